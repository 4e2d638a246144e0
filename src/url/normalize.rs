use crate::UrlError;
use url::Url;

/// Normalizes a URL into the key used for visit deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Take the host (already lowercased by the parser); reject if missing
/// 3. Append `:port` when the port is not the scheme default
/// 4. Append the path with trailing slashes removed
///
/// The scheme, query and fragment are dropped, so `http://h/p`, `https://h/p`
/// and `https://h/p/` all map to `h/p`. The key is never fetched.
///
/// # Arguments
///
/// * `url_str` - The absolute URL string to normalize
///
/// # Returns
///
/// * `Ok(String)` - Normalized key
/// * `Err(UrlError)` - Failed to parse the URL or it has no host
///
/// # Examples
///
/// ```
/// use crawlit::url::normalize_url;
///
/// assert_eq!(normalize_url("https://blog.boot.dev/path/").unwrap(), "blog.boot.dev/path");
/// assert_eq!(normalize_url("http://blog.boot.dev/path").unwrap(), "blog.boot.dev/path");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str).map_err(|source| UrlError::Parse {
        url: url_str.to_string(),
        source,
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(url_str.to_string()))?;

    let path = url.path().trim_end_matches('/');

    let mut key = String::with_capacity(host.len() + path.len() + 6);
    key.push_str(host);
    if let Some(port) = url.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }
    key.push_str(path);

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_and_trailing_slash_insensitive() {
        for input in [
            "https://blog.boot.dev/path",
            "https://blog.boot.dev/path/",
            "http://blog.boot.dev/path",
            "http://blog.boot.dev/path/",
        ] {
            assert_eq!(
                normalize_url(input).unwrap(),
                "blog.boot.dev/path",
                "Failed to normalize {}",
                input
            );
        }
    }

    #[test]
    fn test_root_path() {
        assert_eq!(normalize_url("https://blog.boot.dev").unwrap(), "blog.boot.dev");
        assert_eq!(normalize_url("https://blog.boot.dev/").unwrap(), "blog.boot.dev");
    }

    #[test]
    fn test_idempotent() {
        let key = normalize_url("https://Blog.Boot.dev/a/b/").unwrap();
        let again = normalize_url(&format!("https://{}", key)).unwrap();
        assert_eq!(key, again);
    }

    #[test]
    fn test_lowercase_host() {
        assert_eq!(
            normalize_url("https://EXAMPLE.COM/Page").unwrap(),
            "example.com/Page"
        );
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        assert_eq!(
            normalize_url("https://example.com/page/?q=1#top").unwrap(),
            "example.com/page"
        );
    }

    #[test]
    fn test_non_default_port_kept() {
        assert_eq!(
            normalize_url("http://127.0.0.1:8080/docs/").unwrap(),
            "127.0.0.1:8080/docs"
        );
        assert_eq!(
            normalize_url("https://example.com:443/docs").unwrap(),
            "example.com/docs"
        );
    }

    #[test]
    fn test_multiple_trailing_slashes() {
        assert_eq!(
            normalize_url("https://example.com/page///").unwrap(),
            "example.com/page"
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = normalize_url("/path/one");
        assert!(matches!(result.unwrap_err(), UrlError::Parse { .. }));
    }

    #[test]
    fn test_malformed_url() {
        assert!(normalize_url("not a url").is_err());
        assert!(normalize_url("https://").is_err());
    }

    #[test]
    fn test_missing_host() {
        let result = normalize_url("mailto:someone@example.com");
        assert!(matches!(result.unwrap_err(), UrlError::MissingHost(_)));
    }
}
