use crate::output::stats::CrawlStatistics;
use chrono::{DateTime, Utc};
use std::fmt;

/// Final visit count for one normalized page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCount {
    /// Normalized URL key (`host/path`)
    pub url: String,

    /// Number of times the page was discovered
    pub count: usize,
}

/// Result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed URL the crawl was rooted at
    pub base_url: String,

    /// Every recorded page, most referenced first
    pub pages: Vec<PageCount>,

    pub stats: CrawlStatistics,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Builds a report from registry entries
    ///
    /// Entries are ordered by count (descending) and then by key so the output
    /// is stable between runs over the same site.
    pub fn new(
        base_url: String,
        entries: Vec<(String, usize)>,
        stats: CrawlStatistics,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut pages: Vec<PageCount> = entries
            .into_iter()
            .map(|(url, count)| PageCount { url, count })
            .collect();
        pages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));

        Self {
            base_url,
            pages,
            stats,
            started_at,
            finished_at,
        }
    }

    /// Visit count for a normalized key, if it was recorded
    pub fn count(&self, key: &str) -> Option<usize> {
        self.pages
            .iter()
            .find(|page| page.url == key)
            .map(|page| page.count)
    }

    /// Number of distinct pages recorded
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Sum of all visit counts
    pub fn total_visits(&self) -> usize {
        self.pages.iter().map(|page| page.count).sum()
    }

    /// Wall-clock duration of the crawl in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pages with visit count:")?;
        for page in &self.pages {
            writeln!(f, "{}: {}", page.url, page.count)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.stats)?;
        write!(
            f,
            "Crawled {} pages ({} visits) from {} in {}ms",
            self.total_pages(),
            self.total_visits(),
            self.base_url,
            self.duration_ms()
        )
    }
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport) {
    println!();
    println!("{}", report);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CrawlReport {
        let now = Utc::now();
        CrawlReport::new(
            "https://example.com".to_string(),
            vec![
                ("example.com/b".to_string(), 1),
                ("example.com".to_string(), 3),
                ("example.com/a".to_string(), 1),
            ],
            CrawlStatistics::default(),
            now,
            now,
        )
    }

    #[test]
    fn test_pages_sorted_by_count_then_key() {
        let report = sample_report();
        let keys: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(keys, vec!["example.com", "example.com/a", "example.com/b"]);
    }

    #[test]
    fn test_totals_and_lookup() {
        let report = sample_report();
        assert_eq!(report.total_pages(), 3);
        assert_eq!(report.total_visits(), 5);
        assert_eq!(report.count("example.com"), Some(3));
        assert_eq!(report.count("example.com/missing"), None);
        assert_eq!(report.duration_ms(), 0);
    }

    #[test]
    fn test_display_lists_every_page() {
        let rendered = sample_report().to_string();
        assert!(rendered.starts_with("Pages with visit count:\n"));
        assert!(rendered.contains("example.com: 3\n"));
        assert!(rendered.contains("example.com/a: 1\n"));
        assert!(rendered.contains("=== Crawl Statistics ==="));
    }
}
