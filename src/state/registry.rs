//! Visited-page registry shared by every concurrent visit
//!
//! The registry is the only shared mutable state in a crawl. Every operation
//! takes the lock for a single increment, lookup or length check and never
//! holds it across an await point.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of recording a visit under a hard page budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// First visit of this key; the caller should fetch the page
    First,

    /// The key was already recorded; holds the new count
    Duplicate(usize),

    /// The key is new but the registry is already full; nothing was recorded
    BudgetExhausted,
}

/// Mutex-guarded map from normalized URL to visit count
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    pages: Mutex<HashMap<String, usize>>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the visit count for `key` and returns the new count
    ///
    /// This is the single point that decides whether a discovery is the first
    /// one: exactly one caller ever observes `1` for a given key.
    pub fn record_visit(&self, key: &str) -> usize {
        let mut pages = self.lock();
        let count = pages.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Records a visit only if it does not push the registry past `budget`
    ///
    /// Duplicates of keys that are already present are always counted. The
    /// budget check and the insertion happen under one lock acquisition, so
    /// the registry can never hold more than `budget` keys.
    pub fn record_visit_within(&self, key: &str, budget: usize) -> VisitOutcome {
        let mut pages = self.lock();
        if let Some(count) = pages.get_mut(key) {
            *count += 1;
            return VisitOutcome::Duplicate(*count);
        }
        if pages.len() >= budget {
            return VisitOutcome::BudgetExhausted;
        }
        pages.insert(key.to_string(), 1);
        VisitOutcome::First
    }

    /// Returns true if the registry holds at least `budget` distinct keys
    pub fn size_at_least(&self, budget: usize) -> bool {
        self.lock().len() >= budget
    }

    /// Number of distinct keys recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Visit count for `key`, or zero if it was never recorded
    pub fn count(&self, key: &str) -> usize {
        self.lock().get(key).copied().unwrap_or(0)
    }

    /// Copies out every key and its count
    pub fn snapshot(&self) -> Vec<(String, usize)> {
        self.lock()
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect()
    }

    // Counts are plain integers updated in one statement, so a panic in
    // another holder cannot leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
