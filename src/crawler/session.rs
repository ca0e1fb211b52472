//! Scraping sessions
//!
//! A session fixes what is being scraped (a search query, or a product's
//! reviews or questions) and owns the collection its crawls fill. Each
//! session starts with its own empty collection.

use crate::collection::Collection;
use crate::config::ScraperConfig;
use crate::crawler::coordinator::{CrawlReport, Crawler};
use crate::crawler::parser::{PageExtractor, ReviewExtractor, SearchExtractor};
use crate::url::{
    build_question_url, build_review_url, build_search_url, page_urls, Region,
};
use crate::Result;
use url::Url;

/// A search query and the products found for it
pub type SearchSession = Session<SearchExtractor>;

/// A product's reviews
pub type ReviewSession = Session<ReviewExtractor>;

/// A product's question page entries
pub type QuestionSession = Session<ReviewExtractor>;

/// What to scrape, where to start, and the records gathered so far
#[derive(Debug, Clone)]
pub struct Session<E: PageExtractor> {
    extractor: E,
    region: Region,
    start_url: Url,
    page_urls: Vec<Url>,
    collection: Collection<E::Item>,
}

impl Session<SearchExtractor> {
    /// Prepares a search for `query`, starting at result page `page`
    ///
    /// `region` falls back to the configured default region.
    pub fn search(
        config: &ScraperConfig,
        query: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<Self> {
        let region = resolve_region(config, region)?;
        let code = region.code();
        Ok(Self::from_parts(
            SearchExtractor::new(query)?,
            region,
            build_search_url(code, query, page)?,
            page_urls(page, config.page_limit, |p| build_search_url(code, query, p))?,
        ))
    }

    /// The search query
    pub fn query(&self) -> &str {
        self.extractor.query()
    }
}

impl Session<ReviewExtractor> {
    /// Prepares a crawl of a product's reviews, starting at page `page`
    pub fn reviews(
        config: &ScraperConfig,
        product_name: &str,
        product_id: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<Self> {
        let region = resolve_region(config, region)?;
        let code = region.code();
        Ok(Self::from_parts(
            ReviewExtractor::new()?,
            region,
            build_review_url(code, product_name, product_id, page)?,
            page_urls(page, config.page_limit, |p| {
                build_review_url(code, product_name, product_id, p)
            })?,
        ))
    }

    /// Prepares a crawl of a product's question pages, starting at page `page`
    pub fn questions(
        config: &ScraperConfig,
        product_id: &str,
        page: u32,
        region: Option<&str>,
    ) -> Result<Self> {
        let region = resolve_region(config, region)?;
        let code = region.code();
        Ok(Self::from_parts(
            ReviewExtractor::new()?,
            region,
            build_question_url(code, product_id, page)?,
            page_urls(page, config.page_limit, |p| {
                build_question_url(code, product_id, p)
            })?,
        ))
    }
}

impl<E: PageExtractor> Session<E> {
    fn from_parts(extractor: E, region: Region, start_url: Url, page_urls: Vec<Url>) -> Self {
        Self {
            extractor,
            region,
            start_url,
            page_urls,
            collection: Collection::new(),
        }
    }

    /// Crawls from the start URL, following next page links
    pub async fn crawl(&mut self, crawler: &Crawler) -> Result<CrawlReport> {
        let start = self.start_url.clone();
        self.crawl_from(crawler, start).await
    }

    /// Crawls from an arbitrary URL, following next page links
    pub async fn crawl_from(&mut self, crawler: &Crawler, start: Url) -> Result<CrawlReport> {
        crawler
            .crawl(start, &self.extractor, &mut self.collection)
            .await
    }

    /// Fetches only the pre-built page URLs
    ///
    /// Fetches nothing when the session was created with a page count at or
    /// above the page limit.
    pub async fn crawl_pages(&mut self, crawler: &Crawler) -> Result<CrawlReport> {
        crawler
            .crawl_pages(&self.page_urls, &self.extractor, &mut self.collection)
            .await
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Storefront root for the session's region
    pub fn base_url(&self) -> String {
        self.region.base_url()
    }

    /// URL the next [`crawl`](Self::crawl) starts from
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Pre-built URLs for pages `1..=page`
    pub fn page_urls(&self) -> &[Url] {
        &self.page_urls
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Records gathered so far
    pub fn collection(&self) -> &Collection<E::Item> {
        &self.collection
    }

    pub fn into_collection(self) -> Collection<E::Item> {
        self.collection
    }
}

fn resolve_region(config: &ScraperConfig, region: Option<&str>) -> Result<Region> {
    region.unwrap_or(&config.default_region).parse()
}
