//! Crawlit: a bounded-concurrency same-site web crawler
//!
//! This crate crawls every page reachable from a seed URL that shares the seed's
//! prefix, counting how often each normalized page is referenced. Visits fan out
//! onto tokio tasks while concurrency slots are free and fall back to inline
//! recursion when they are not.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Crawlit operations
#[derive(Debug, Error)]
pub enum CrawlitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("URL is not absolute: {0}")]
    NotAbsolute(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Page fetch errors
///
/// Every variant carries the URL that was being fetched so the crawl log can
/// name the branch that stopped expanding.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Non-HTML content type '{content_type}' from {url}")]
    ContentType { url: String, content_type: String },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL the failed request was made to
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::ContentType { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Crawlit operations
pub type Result<T> = std::result::Result<T, CrawlitError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Crawler};
pub use output::CrawlReport;
pub use state::VisitedRegistry;
pub use url::{canonical_url, is_same_site, is_valid_absolute_url, normalize_url};
