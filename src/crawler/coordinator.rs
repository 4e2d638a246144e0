//! Crawler coordinator - main crawl orchestration logic
//!
//! A crawl is a tree of page visits spread over tokio tasks. Each visit:
//! - Bails out early once the page budget is reached
//! - Records the page in the shared registry and stops on duplicates
//! - Fetches the page and extracts its links
//! - Dispatches every same-site link as a child visit, on a new task when a
//!   concurrency slot is free and inline otherwise
//!
//! Every visit holds a pending-work guard until it and its inline children
//! are done, so the initiator can wait for the whole transitive crawl before
//! reporting.

use crate::config::{validate, Config};
use crate::crawler::admission::{ConcurrencySlots, PendingWork, WorkGuard};
use crate::crawler::{build_http_client, extract_links, fetch_page};
use crate::output::{CrawlObserver, CrawlReport, CrawlStats, StdoutObserver};
use crate::state::{VisitOutcome, VisitedRegistry};
use crate::url::{canonical_url, is_same_site, normalize_url};
use crate::CrawlitError;
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type VisitFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// State shared by every visit of one crawl
struct CrawlContext {
    /// Seed exactly as given; fetched first and named in the report
    seed: String,
    /// Canonical form of the seed, used to resolve links and as the
    /// same-site prefix
    base_url: String,
    max_pages: usize,
    strict_budget: bool,
    client: Client,
    registry: VisitedRegistry,
    slots: ConcurrencySlots,
    pending: PendingWork,
    stats: CrawlStats,
    observer: Arc<dyn CrawlObserver>,
}

/// A configured, not yet started crawl
pub struct Crawler {
    context: Arc<CrawlContext>,
}

impl Crawler {
    /// Creates a crawler that prints visited pages to stdout
    ///
    /// # Arguments
    ///
    /// * `seed` - Absolute URL to start from; its canonical form is the
    ///   same-site prefix
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlitError)` - Invalid seed or configuration, or the HTTP
    ///   client could not be built
    pub fn new(seed: &str, config: &Config) -> Result<Self, CrawlitError> {
        Self::with_observer(seed, config, Arc::new(StdoutObserver))
    }

    /// Creates a crawler that reports visited pages to `observer`
    pub fn with_observer(
        seed: &str,
        config: &Config,
        observer: Arc<dyn CrawlObserver>,
    ) -> Result<Self, CrawlitError> {
        let base_url = canonical_url(seed)?;
        validate(config)?;

        let client = build_http_client(&config.http)?;

        let context = CrawlContext {
            seed: seed.to_string(),
            base_url,
            max_pages: config.crawler.max_pages,
            strict_budget: config.crawler.strict_budget,
            client,
            registry: VisitedRegistry::new(),
            slots: ConcurrencySlots::new(config.crawler.max_concurrency),
            pending: PendingWork::new(),
            stats: CrawlStats::new(),
            observer,
        };

        Ok(Self {
            context: Arc::new(context),
        })
    }

    /// Runs the crawl to completion and returns the final report
    ///
    /// The report is built only after every spawned and inline visit has
    /// finished.
    pub async fn crawl(self) -> CrawlReport {
        let context = self.context;
        let started_at = Utc::now();

        tracing::info!(
            "Starting crawl of {} (max pages: {}, max concurrency: {}, strict budget: {})",
            context.seed,
            context.max_pages,
            context.slots.capacity(),
            context.strict_budget
        );

        let root = context.pending.register();
        Arc::clone(&context)
            .visit(context.seed.clone(), root)
            .await;
        context.pending.wait().await;

        let finished_at = Utc::now();
        let stats = context.stats.snapshot(context.slots.peak_in_use());

        tracing::info!(
            "Crawl completed: {} pages recorded, {} visited, {} errors in {}ms",
            context.registry.len(),
            stats.pages_visited,
            stats.total_errors(),
            (finished_at - started_at).num_milliseconds()
        );

        CrawlReport::new(
            context.seed.clone(),
            context.registry.snapshot(),
            stats,
            started_at,
            finished_at,
        )
    }
}

/// A page whose links are still being dispatched
///
/// Holding the frame keeps the page's pending-work unit registered until the
/// last of its inline children has finished.
struct Frame {
    links: std::vec::IntoIter<String>,
    _work: WorkGuard,
}

impl CrawlContext {
    /// Visits one URL and everything it dispatches inline
    ///
    /// `work` is the pending-work unit registered for this call by whoever
    /// scheduled it. Inline children are kept on an explicit stack rather than
    /// nested futures, so long link chains cost heap, not task stack. A child
    /// is finished, subtree included, before its next sibling is dispatched.
    fn visit(self: Arc<Self>, url: String, work: WorkGuard) -> VisitFuture {
        Box::pin(async move {
            let mut stack = Vec::new();
            if let Some(links) = self.expand(&url).await {
                stack.push(Frame {
                    links: links.into_iter(),
                    _work: work,
                });
            }

            loop {
                let next = match stack.last_mut() {
                    Some(frame) => frame.links.next(),
                    None => break,
                };

                // Dropping a finished frame releases its pending-work unit
                let Some(link) = next else {
                    stack.pop();
                    continue;
                };

                if !is_same_site(&link, &self.base_url) {
                    continue;
                }

                let child = self.pending.register();
                match self.slots.try_acquire() {
                    Some(permit) => {
                        self.stats.record_spawned();
                        let context = Arc::clone(&self);
                        tokio::spawn(async move {
                            context.visit(link, child).await;
                            drop(permit);
                        });
                    }
                    None => {
                        self.stats.record_inline();
                        if let Some(links) = self.expand(&link).await {
                            stack.push(Frame {
                                links: links.into_iter(),
                                _work: child,
                            });
                        }
                    }
                }
            }
        })
    }

    /// Records, fetches and parses one page
    ///
    /// Returns the page's resolved links, or `None` when the page is skipped
    /// or fails. The page is reported to the observer before any of its links
    /// are dispatched.
    async fn expand(&self, url: &str) -> Option<Vec<String>> {
        // Approximate: other visits may insert between this check and the
        // increment below, so the soft budget can be overshot slightly.
        if self.registry.size_at_least(self.max_pages) {
            tracing::trace!("Page budget reached, skipping {}", url);
            self.stats.record_budget_skip();
            return None;
        }

        let key = match normalize_url(url) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Failed to normalize {}: {}", url, e);
                self.stats.record_normalize_failure();
                return None;
            }
        };

        if !self.record_first_visit(&key) {
            return None;
        }

        tracing::debug!("Fetching {}", url);
        let body = match fetch_page(&self.client, url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", e.url(), e);
                self.stats.record_fetch_failure();
                return None;
            }
        };

        let links = match extract_links(&body, &self.base_url) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Failed to extract links from {}: {}", url, e);
                self.stats.record_parse_failure();
                return None;
            }
        };

        self.stats.record_page_visited();
        self.observer.page_visited(url);

        Some(links)
    }

    /// Counts a discovery of `key`; true only for the one that should fetch
    fn record_first_visit(&self, key: &str) -> bool {
        if self.strict_budget {
            match self.registry.record_visit_within(key, self.max_pages) {
                VisitOutcome::First => true,
                VisitOutcome::Duplicate(count) => {
                    tracing::trace!("Already recorded {} ({} discoveries)", key, count);
                    self.stats.record_duplicate();
                    false
                }
                VisitOutcome::BudgetExhausted => {
                    tracing::trace!("Page budget reached, not recording {}", key);
                    self.stats.record_budget_skip();
                    false
                }
            }
        } else {
            let count = self.registry.record_visit(key);
            if count > 1 {
                tracing::trace!("Already recorded {} ({} discoveries)", key, count);
                self.stats.record_duplicate();
            }
            count == 1
        }
    }
}

/// Runs a complete crawl from `seed` with stdout output
///
/// # Example
///
/// ```no_run
/// use crawlit::config::Config;
/// use crawlit::crawler::crawl;
///
/// # async fn example() -> Result<(), crawlit::CrawlitError> {
/// let report = crawl("https://blog.boot.dev", &Config::default()).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, config: &Config) -> Result<CrawlReport, CrawlitError> {
    let crawler = Crawler::new(seed, config)?;
    Ok(crawler.crawl().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_seed() {
        let result = Crawler::new("blog.boot.dev", &Config::default());
        assert!(matches!(result, Err(CrawlitError::Url(_))));
    }

    #[test]
    fn test_rejects_seed_without_host() {
        let result = Crawler::new("mailto:someone@example.com", &Config::default());
        assert!(matches!(
            result,
            Err(CrawlitError::Url(crate::UrlError::MissingHost(_)))
        ));
    }

    #[test]
    fn test_same_site_prefix_is_canonical_seed() {
        let crawler = Crawler::new("HTTPS://Blog.Boot.dev:443", &Config::default()).unwrap();
        assert_eq!(crawler.context.seed, "HTTPS://Blog.Boot.dev:443");
        assert_eq!(crawler.context.base_url, "https://blog.boot.dev/");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        let result = Crawler::new("https://blog.boot.dev", &config);
        assert!(matches!(result, Err(CrawlitError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_seed_is_recorded_but_not_visited() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let observer = Arc::new(crate::output::RecordingObserver::new());
        let crawler = Crawler::with_observer(
            "http://127.0.0.1:9/",
            &Config::default(),
            observer.clone(),
        )
        .unwrap();

        let report = crawler.crawl().await;

        assert_eq!(report.count("127.0.0.1:9"), Some(1));
        assert_eq!(report.stats.fetch_failures, 1);
        assert!(observer.pages().is_empty());
    }
}
