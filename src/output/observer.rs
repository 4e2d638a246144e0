use std::sync::{Mutex, PoisonError};

/// Receives the stream of successfully visited pages
///
/// Called from whichever task finished the visit, so pages arrive in no
/// particular order.
pub trait CrawlObserver: Send + Sync {
    /// A page was fetched and its links extracted
    fn page_visited(&self, url: &str);
}

/// Prints one line per visited page to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutObserver;

impl CrawlObserver for StdoutObserver {
    fn page_visited(&self, url: &str) {
        println!("{}", url);
    }
}

/// Keeps every visited page in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pages: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages reported so far
    pub fn pages(&self) -> Vec<String> {
        self.pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CrawlObserver for RecordingObserver {
    fn page_visited(&self, url: &str) {
        self.pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::new();
        observer.page_visited("https://example.com");
        observer.page_visited("https://example.com/a");
        assert_eq!(
            observer.pages(),
            vec!["https://example.com", "https://example.com/a"]
        );
    }
}
