//! Crawl loop - pagination-driven fetching and accumulation
//!
//! The loop fetches one page, appends its records to the caller's collection,
//! and moves on to the page's "next" link until there is none. Pages are
//! fetched strictly one after another.

use crate::collection::Collection;
use crate::config::HttpConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchedPage};
use crate::crawler::parser::PageExtractor;
use crate::Result;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages_fetched: usize,
    pub items_added: usize,
    /// Malformed items left out of the collection
    pub items_skipped: usize,
    /// HTTP status of the last page fetched
    pub last_status: Option<u16>,
    /// Final URL of the last page fetched
    pub last_url: Option<Url>,
}

/// Fetches pages and feeds them through an extractor
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
}

impl Crawler {
    /// Creates a crawler with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a crawler around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches a single page without extracting anything
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        fetch_page(&self.client, url).await
    }

    /// Crawls from `start`, following next page links
    ///
    /// Records are appended to `collection` as each page is extracted, so a
    /// transport failure part-way through leaves the earlier pages' records in
    /// place. The crawl ends normally when a page has no next link, or when the
    /// next link points back at a page already fetched in this crawl, whether by
    /// its requested URL or by where a redirect landed.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl reached its last page
    /// * `Err(ScrapeError::Transport)` - A page could not be fetched
    pub async fn crawl<E: PageExtractor>(
        &self,
        start: Url,
        extractor: &E,
        collection: &mut Collection<E::Item>,
    ) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();
        let mut visited = HashSet::new();
        let mut current = Some(start);

        while let Some(url) = current.take() {
            let next = self.visit(&url, extractor, collection, &mut report).await?;
            visited.insert(url);
            if let Some(final_url) = &report.last_url {
                // Redirects land somewhere else; both URLs count as fetched
                visited.insert(final_url.clone());
            }
            current = match next {
                Some(next) if visited.contains(&next) => {
                    tracing::warn!("Next page {} was already fetched, stopping", next);
                    None
                }
                next => next,
            };
        }

        tracing::info!(
            "Crawl finished: {} pages, {} items added, {} skipped",
            report.pages_fetched,
            report.items_added,
            report.items_skipped
        );

        Ok(report)
    }

    /// Fetches each of `urls` once, ignoring their next page links
    pub async fn crawl_pages<E: PageExtractor>(
        &self,
        urls: &[Url],
        extractor: &E,
        collection: &mut Collection<E::Item>,
    ) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();

        for url in urls {
            self.visit(url, extractor, collection, &mut report).await?;
        }

        tracing::info!(
            "Fetched {} pre-built pages, {} items added, {} skipped",
            report.pages_fetched,
            report.items_added,
            report.items_skipped
        );

        Ok(report)
    }

    /// Fetches and extracts one page, returning its next page link
    async fn visit<E: PageExtractor>(
        &self,
        url: &Url,
        extractor: &E,
        collection: &mut Collection<E::Item>,
        report: &mut CrawlReport,
    ) -> Result<Option<Url>> {
        let page = fetch_page(&self.client, url).await?;
        let extract = extractor.extract_html(&page.body, &page.final_url);

        tracing::debug!(
            "Extracted {} items ({} skipped) from {}",
            extract.items.len(),
            extract.skipped,
            page.final_url
        );

        report.pages_fetched += 1;
        report.items_added += extract.items.len();
        report.items_skipped += extract.skipped;
        report.last_status = Some(page.status);
        report.last_url = Some(page.final_url);
        collection.extend(extract.items);

        Ok(extract.next_page)
    }
}
