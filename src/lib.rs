//! Skyquake: a retail listing scraper
//!
//! This crate fetches search-result, review and question pages from the regional
//! storefronts of a retail site, extracts structured records from the HTML, and
//! collects them into an indexed, read-mostly collection.

pub mod collection;
pub mod config;
pub mod crawler;
pub mod url;

use thiserror::Error;

/// Main error type for Skyquake operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0:?} is an invalid region")]
    InvalidRegion(String),

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// HTML extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Missing field {field} in {node}")]
    MissingField { field: &'static str, node: String },

    #[error("Cannot resolve link {0:?}")]
    InvalidLink(String),
}

/// Collection lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("The key {0:?} does not exist")]
    MissingKey(String),

    #[error("Offset {offset} is out of range for {len} items")]
    OutOfRange { offset: isize, len: usize },

    #[error("The key {attribute:?} is not available at index {index:?}")]
    MissingAttribute { attribute: String, index: String },
}

/// Result type alias for Skyquake operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for collection lookups
pub type LookupResult<T> = std::result::Result<T, LookupError>;

// Re-export commonly used types
pub use collection::{Collection, Record};
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, Product, Review, Session};
pub use crate::url::{build_base_url, Region};
