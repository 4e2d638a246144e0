//! URL handling module for Crawlit
//!
//! This module provides URL normalization (the deduplication key), absolute
//! URL validation for the seed, and the same-site filter applied to
//! discovered links.

mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use normalize::normalize_url;

/// Returns true if the string parses as a URL with both a scheme and a host
///
/// # Examples
///
/// ```
/// use crawlit::url::is_valid_absolute_url;
///
/// assert!(is_valid_absolute_url("https://blog.boot.dev"));
/// assert!(!is_valid_absolute_url("blog.boot.dev"));
/// ```
pub fn is_valid_absolute_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// Serializes an absolute URL the way resolved links are serialized
///
/// The host is lowercased and a default port is dropped, so the result can be
/// used as the prefix for [`is_same_site`] against links from
/// `extract_links`.
///
/// # Examples
///
/// ```
/// use crawlit::url::canonical_url;
///
/// assert_eq!(canonical_url("https://Blog.Boot.dev").unwrap(), "https://blog.boot.dev/");
/// assert_eq!(canonical_url("https://blog.boot.dev:443/a").unwrap(), "https://blog.boot.dev/a");
/// ```
pub fn canonical_url(raw: &str) -> Result<String, UrlError> {
    let url = Url::parse(raw).map_err(|source| UrlError::Parse {
        url: raw.to_string(),
        source,
    })?;
    if !url.has_host() {
        return Err(UrlError::MissingHost(raw.to_string()));
    }
    Ok(url.into())
}

/// Returns true if `link` belongs to the site rooted at `base`
///
/// This is a plain string prefix test against the seed exactly as it was
/// given. It does not compare hosts, so `http://` links under an `https://`
/// seed are treated as off-site.
pub fn is_same_site(link: &str, base: &str) -> bool {
    link.starts_with(base)
}
