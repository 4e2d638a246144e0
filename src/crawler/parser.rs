//! HTML link extraction
//!
//! Parses page markup and returns the target of every anchor on the page as
//! an absolute URL string, in document order.

use crate::UrlError;
use scraper::{Html, Selector};
use url::{ParseError, Url};

/// Extracts all anchor targets from an HTML document
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` in depth-first document order, duplicates included
/// - An href that parses on its own as an absolute URL is kept as parsed
/// - Anything else is resolved as a relative reference against `base_url`
///   (dot segments, query and fragment follow standard URL resolution)
/// - An href that cannot be resolved is skipped
///
/// No filtering by scheme or site happens here; the crawl controller applies
/// the same-site filter.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Absolute URLs in document order
/// * `Err(UrlError)` - `base_url` is not a valid absolute URL
///
/// # Example
///
/// ```
/// use crawlit::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/path/one">One</a></body></html>"#;
/// let links = extract_links(html, "https://blog.boot.dev").unwrap();
/// assert_eq!(links, vec!["https://blog.boot.dev/path/one"]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Result<Vec<String>, UrlError> {
    let base = Url::parse(base_url).map_err(|source| UrlError::Parse {
        url: base_url.to_string(),
        source,
    })?;

    let document = Html::parse_document(html);

    let links = collect_hrefs(&document)
        .into_iter()
        .filter_map(|href| resolve_link(href, &base))
        .collect();

    Ok(links)
}

/// Collects raw href values from every anchor in the document
fn collect_hrefs(document: &Html) -> Vec<&str> {
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href);
            }
        }
    }

    hrefs
}

/// Resolves a link href to an absolute URL string
///
/// Returns None if the href is neither an absolute URL nor a relative
/// reference that can be joined onto the base.
fn resolve_link(href: &str, base: &Url) -> Option<String> {
    match Url::parse(href) {
        Ok(absolute_url) => Some(absolute_url.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => match base.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                tracing::trace!("Skipping unresolvable href {:?}: {}", href, e);
                None
            }
        },
        Err(e) => {
            tracing::trace!("Skipping malformed href {:?}: {}", href, e);
            None
        }
    }
}
