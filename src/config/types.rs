use serde::Deserialize;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("crawlit/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for Crawlit
///
/// Every field has a default so a config file only needs the keys it wants to
/// change. The seed URL and the two limits normally come from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of distinct pages the crawl may record
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum number of concurrently spawned visits (0 crawls sequentially)
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Enforce the page budget as a hard cap instead of a best-effort check
    #[serde(rename = "strict-budget", default)]
    pub strict_budget: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            max_concurrency: default_max_concurrency(),
            strict_budget: false,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds; no timeout when absent
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: None,
        }
    }
}

fn default_max_pages() -> usize {
    100
}

fn default_max_concurrency() -> usize {
    5
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
