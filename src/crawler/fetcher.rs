//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the configured user agent
//! - GET requests to fetch page content
//! - Rejecting error statuses and non-HTML content types
//!
//! There is no retry logic. A failed fetch ends the expansion of that page.

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::{header, Client, Response};
use std::time::Duration;

/// Content type substring a response must carry to be parsed as markup
const HTML_CONTENT_TYPE: &str = "text/html";

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent, optional timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use crawlit::config::HttpConfig;
/// use crawlit::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page and returns its body as text
///
/// # Request Flow
///
/// 1. Send GET request (redirects are followed by the client)
/// 2. Status >= 400 → `FetchError::Status`
/// 3. `Content-Type` without `text/html` → `FetchError::ContentType`
/// 4. Read the body → `Ok(body)`
///
/// Rejected responses have their body drained before being dropped so the
/// connection is returned to the pool cleanly.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    // Anything from 400 up is rejected, including nonstandard codes above 599
    let status = response.status();
    if status.as_u16() >= 400 {
        drain(response).await;
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains(HTML_CONTENT_TYPE) {
        drain(response).await;
        return Err(FetchError::ContentType {
            url: url.to_string(),
            content_type,
        });
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

/// Reads and discards the rest of a response body
async fn drain(response: Response) {
    let url = response.url().to_string();
    if let Err(e) = response.bytes().await {
        tracing::trace!("Failed to drain response body from {}: {}", url, e);
    }
}
