use serde::Deserialize;

/// Upper bound (exclusive) on the number of pre-built page URLs
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Region used when the caller does not name one
pub const DEFAULT_REGION: &str = "UK";

/// Browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/62.0.3202.94 Safari/537.36";

/// Main configuration structure for Skyquake
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Two-letter region code used when none is given
    #[serde(rename = "default-region", default = "default_region")]
    pub default_region: String,

    /// Page counts at or above this value pre-build no URLs
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Verify TLS certificates. Turning this off accepts any certificate.
    #[serde(rename = "verify-tls", default = "default_verify_tls")]
    pub verify_tls: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            page_limit: default_page_limit(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            verify_tls: default_verify_tls(),
        }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_verify_tls() -> bool {
    true
}
