//! HTML extraction of listing records
//!
//! Search pages yield [`Product`]s, review and question pages yield
//! [`Review`]s. Every page is also checked for a "next page" link.
//!
//! An item whose markup lacks an expected element is skipped and counted;
//! the rest of the page is still extracted.

use crate::collection::Record;
use crate::crawler::models::{Product, Review};
use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use url::Url;

/// Records extracted from one page
#[derive(Debug, Clone)]
pub struct PageExtract<T> {
    pub items: Vec<T>,
    /// Number of malformed items that were skipped
    pub skipped: usize,
    /// Absolute URL of the following page, if any
    pub next_page: Option<Url>,
}

/// Extracts records of one kind from a parsed page
pub trait PageExtractor {
    type Item: Record + fmt::Debug + Clone;

    /// Extracts records and the next page link from a document
    ///
    /// `page_url` is the URL the document was fetched from; relative links are
    /// resolved against it.
    fn extract(&self, document: &Html, page_url: &Url) -> PageExtract<Self::Item>;

    /// Parses raw HTML and extracts from it
    fn extract_html(&self, html: &str, page_url: &Url) -> PageExtract<Self::Item> {
        let document = Html::parse_document(html);
        self.extract(&document, page_url)
    }
}

/// Locates the "next page" link in the pagination bar
#[derive(Debug, Clone)]
struct NextPage {
    last: Selector,
    anchor: Selector,
}

impl NextPage {
    fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            last: selector("li.a-last")?,
            anchor: selector("a[href]")?,
        })
    }

    /// Best-effort lookup: any missing piece means there is no next page
    fn find(&self, document: &Html, page_url: &Url) -> Option<Url> {
        let Some(last) = document.select(&self.last).next() else {
            tracing::debug!("No pagination node on {}", page_url);
            return None;
        };

        let href = last
            .select(&self.anchor)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))?;

        match page_url.join(href.trim()) {
            Ok(next) => Some(next),
            Err(e) => {
                tracing::warn!("Ignoring next page link {:?} on {}: {}", href, page_url, e);
                None
            }
        }
    }
}

/// Extracts search results
#[derive(Debug, Clone)]
pub struct SearchExtractor {
    query: String,
    anchor: Selector,
    title: Selector,
    next: NextPage,
}

impl SearchExtractor {
    /// Creates an extractor tagging every product with `query`
    pub fn new(query: &str) -> Result<Self, ExtractionError> {
        Ok(Self {
            query: query.to_string(),
            anchor: selector("a.a-link-normal.a-text-normal")?,
            title: selector("span")?,
            next: NextPage::new()?,
        })
    }

    /// The query products are tagged with
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Builds a product from a result anchor
    ///
    /// The href is resolved against the page URL. Result links are rooted
    /// (`/Name/dp/ID`), which makes this the storefront root joined with the
    /// href; an unrooted href resolves relative to the page's path instead.
    fn product(&self, anchor: ElementRef<'_>, page_url: &Url) -> Result<Product, ExtractionError> {
        let title = text_of(anchor, &self.title, "title")?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| missing("url", anchor))?;
        let url = page_url
            .join(href.trim())
            .map_err(|_| ExtractionError::InvalidLink(href.to_string()))?;

        Ok(Product {
            query: self.query.clone(),
            title,
            url: url.to_string(),
        })
    }
}

impl PageExtractor for SearchExtractor {
    type Item = Product;

    fn extract(&self, document: &Html, page_url: &Url) -> PageExtract<Product> {
        let (items, skipped) = collect_items(document.select(&self.anchor), page_url, |anchor| {
            self.product(anchor, page_url)
        });

        PageExtract {
            items,
            skipped,
            next_page: self.next.find(document, page_url),
        }
    }
}

/// Extracts reviews from review pages and entries from question pages
#[derive(Debug, Clone)]
pub struct ReviewExtractor {
    container: Selector,
    author: Selector,
    title: Selector,
    content: Selector,
    date: Selector,
    rating: Selector,
    next: NextPage,
}

impl ReviewExtractor {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            container: selector(r#"div[data-hook="review"]"#)?,
            author: selector("div.a-profile-content > span")?,
            title: selector("a.review-title > span")?,
            content: selector("span.review-text-content > span")?,
            date: selector("span.review-date")?,
            rating: selector("span.a-icon-alt")?,
            next: NextPage::new()?,
        })
    }

    fn review(&self, container: ElementRef<'_>) -> Result<Review, ExtractionError> {
        let author = text_of(container, &self.author, "author")?;
        let title = text_of(container, &self.title, "title")?;
        let content = text_of(container, &self.content, "content")?;
        let date = text_of(container, &self.date, "date")?;
        let rating = text_of(container, &self.rating, "rating")?
            .chars()
            .take(3)
            .collect();
        let review_id = container
            .value()
            .id()
            .ok_or_else(|| missing("review_id", container))?
            .to_string();

        Ok(Review {
            author,
            title,
            content,
            date,
            rating,
            review_id,
        })
    }
}

impl PageExtractor for ReviewExtractor {
    type Item = Review;

    fn extract(&self, document: &Html, page_url: &Url) -> PageExtract<Review> {
        let (items, skipped) = collect_items(document.select(&self.container), page_url, |node| {
            self.review(node)
        });

        PageExtract {
            items,
            skipped,
            next_page: self.next.find(document, page_url),
        }
    }
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{}: {:?}", css, e)))
}

/// Runs `extract` over every node, keeping successes and counting failures
fn collect_items<'a, T, I, F>(nodes: I, page_url: &Url, mut extract: F) -> (Vec<T>, usize)
where
    I: Iterator<Item = ElementRef<'a>>,
    F: FnMut(ElementRef<'a>) -> Result<T, ExtractionError>,
{
    let mut items = Vec::new();
    let mut skipped = 0;

    for node in nodes {
        match extract(node) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!("Skipping malformed item on {}: {}", page_url, e);
                skipped += 1;
            }
        }
    }

    (items, skipped)
}

/// Trimmed text of the first descendant matching `selector`
fn text_of(
    element: ElementRef<'_>,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ExtractionError> {
    element
        .select(selector)
        .next()
        .map(|found| found.text().collect::<String>().trim().to_string())
        .ok_or_else(|| missing(field, element))
}

fn missing(field: &'static str, element: ElementRef<'_>) -> ExtractionError {
    let value = element.value();
    let node = match value.id() {
        Some(id) => format!("<{} id={:?}>", value.name(), id),
        None => format!("<{}>", value.name()),
    };
    ExtractionError::MissingField { field, node }
}
