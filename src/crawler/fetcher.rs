//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests returning the status, final URL and body

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// A fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub final_url: Url,
    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body into a document tree
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use skyquake::config::HttpConfig;
/// use skyquake::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    if !config.verify_tls {
        tracing::warn!("TLS certificate verification is disabled");
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .danger_accept_invalid_certs(!config.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// Non-2xx responses are returned like any other page so the caller sees the
/// status; only transport failures (connect, timeout, body read) are errors.
/// Nothing is retried.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - The response status, final URL and body
/// * `Err(ScrapeError::Transport)` - The request or body read failed
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, ScrapeError> {
    tracing::debug!("Fetching {}", url);

    let transport = |source| ScrapeError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(transport)?;
    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}", final_url, status.as_u16());
    }

    let body = response.text().await.map_err(transport)?;

    Ok(FetchedPage {
        status: status.as_u16(),
        final_url,
        body,
    })
}
