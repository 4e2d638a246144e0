//! Crawl statistics
//!
//! `CrawlStats` is updated live by every visit; `CrawlStatistics` is the
//! plain snapshot taken once the crawl has finished.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters shared by all visits
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_visited: AtomicUsize,
    duplicate_discoveries: AtomicUsize,
    budget_skips: AtomicUsize,
    normalize_failures: AtomicUsize,
    fetch_failures: AtomicUsize,
    parse_failures: AtomicUsize,
    spawned_visits: AtomicUsize,
    inline_visits: AtomicUsize,
}

impl CrawlStats {
    /// Creates zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// A page was fetched, parsed and reported
    pub fn record_page_visited(&self) {
        self.pages_visited.fetch_add(1, Ordering::Relaxed);
    }

    /// A link pointed at a page that was already recorded
    pub fn record_duplicate(&self) {
        self.duplicate_discoveries.fetch_add(1, Ordering::Relaxed);
    }

    /// A visit was dropped because the page budget was reached
    pub fn record_budget_skip(&self) {
        self.budget_skips.fetch_add(1, Ordering::Relaxed);
    }

    /// A URL could not be normalized
    pub fn record_normalize_failure(&self) {
        self.normalize_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A fetch failed (transport, status or content type)
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Links could not be extracted from a fetched page
    pub fn record_parse_failure(&self) {
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A child visit was given its own task
    pub fn record_spawned(&self) {
        self.spawned_visits.fetch_add(1, Ordering::Relaxed);
    }

    /// A child visit ran inline because no slot was free
    pub fn record_inline(&self) {
        self.inline_visits.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a snapshot; `peak_concurrent_tasks` comes from the slot pool
    pub fn snapshot(&self, peak_concurrent_tasks: usize) -> CrawlStatistics {
        CrawlStatistics {
            pages_visited: self.pages_visited.load(Ordering::Relaxed),
            duplicate_discoveries: self.duplicate_discoveries.load(Ordering::Relaxed),
            budget_skips: self.budget_skips.load(Ordering::Relaxed),
            normalize_failures: self.normalize_failures.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            parse_failures: self.parse_failures.load(Ordering::Relaxed),
            spawned_visits: self.spawned_visits.load(Ordering::Relaxed),
            inline_visits: self.inline_visits.load(Ordering::Relaxed),
            peak_concurrent_tasks,
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched, parsed and reported
    pub pages_visited: usize,

    /// Links to pages that were already recorded
    pub duplicate_discoveries: usize,

    /// Visits dropped on the page budget
    pub budget_skips: usize,

    /// URLs that failed normalization
    pub normalize_failures: usize,

    /// Fetches that failed
    pub fetch_failures: usize,

    /// Pages whose links could not be extracted
    pub parse_failures: usize,

    /// Child visits run on their own task
    pub spawned_visits: usize,

    /// Child visits run inline
    pub inline_visits: usize,

    /// Most spawned visits observed running at once
    pub peak_concurrent_tasks: usize,
}

impl CrawlStatistics {
    /// Total errors of any kind
    pub fn total_errors(&self) -> usize {
        self.normalize_failures + self.fetch_failures + self.parse_failures
    }
}

impl fmt::Display for CrawlStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Crawl Statistics ===")?;
        writeln!(f, "  Pages visited: {}", self.pages_visited)?;
        writeln!(f, "  Duplicate discoveries: {}", self.duplicate_discoveries)?;
        writeln!(f, "  Budget skips: {}", self.budget_skips)?;
        writeln!(
            f,
            "  Errors: {} (normalize: {}, fetch: {}, parse: {})",
            self.total_errors(),
            self.normalize_failures,
            self.fetch_failures,
            self.parse_failures
        )?;
        writeln!(
            f,
            "  Child visits: {} spawned, {} inline",
            self.spawned_visits, self.inline_visits
        )?;
        write!(f, "  Peak concurrent tasks: {}", self.peak_concurrent_tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let stats = CrawlStats::new();
        stats.record_page_visited();
        stats.record_page_visited();
        stats.record_duplicate();
        stats.record_fetch_failure();
        stats.record_parse_failure();
        stats.record_spawned();
        stats.record_inline();
        stats.record_inline();

        let snapshot = stats.snapshot(3);
        assert_eq!(snapshot.pages_visited, 2);
        assert_eq!(snapshot.duplicate_discoveries, 1);
        assert_eq!(snapshot.total_errors(), 2);
        assert_eq!(snapshot.spawned_visits, 1);
        assert_eq!(snapshot.inline_visits, 2);
        assert_eq!(snapshot.peak_concurrent_tasks, 3);
    }

    #[test]
    fn test_display() {
        let snapshot = CrawlStatistics {
            pages_visited: 4,
            fetch_failures: 1,
            ..Default::default()
        };
        let rendered = snapshot.to_string();
        assert!(rendered.contains("Pages visited: 4"));
        assert!(rendered.contains("Errors: 1 (normalize: 0, fetch: 1, parse: 0)"));
    }
}
