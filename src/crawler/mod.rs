//! Crawler module for page fetching and record extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed user agent and timeout
//! - HTML extraction of products and reviews
//! - The pagination loop that follows "next page" links
//! - Search, review and question sessions that own their results

mod coordinator;
mod fetcher;
mod models;
mod parser;
mod session;

pub use coordinator::{CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use models::{Product, Review};
pub use parser::{PageExtract, PageExtractor, ReviewExtractor, SearchExtractor};
pub use session::{QuestionSession, ReviewSession, SearchSession, Session};
