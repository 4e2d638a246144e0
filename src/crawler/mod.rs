//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with status and content-type checks
//! - HTML parsing and link extraction
//! - Concurrency admission and pending-work tracking
//! - Overall crawl coordination

mod admission;
mod coordinator;
mod fetcher;
mod parser;

pub use admission::{ConcurrencySlots, PendingWork, WorkGuard};
pub use coordinator::{crawl, Crawler};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::extract_links;
