//! Output module for crawl results
//!
//! This module handles:
//! - The stream of visited pages, emitted as each visit completes
//! - The final report of per-page visit counts
//! - Crawl statistics gathered while visiting

mod observer;
mod report;
mod stats;

pub use observer::{CrawlObserver, RecordingObserver, StdoutObserver};
pub use report::{print_report, CrawlReport, PageCount};
pub use stats::{CrawlStatistics, CrawlStats};
