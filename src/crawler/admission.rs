//! Admission control and completion tracking
//!
//! - `ConcurrencySlots`: a counting semaphore bounding how many child visits
//!   run as their own tokio task. Slots are only ever try-acquired; a visit
//!   that cannot get one runs inline instead of waiting.
//! - `PendingWork`: counts visits that have been scheduled but whose body has
//!   not finished, spawned or inline. The crawl initiator waits on it once to
//!   learn that the whole transitive crawl is over.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, OwnedSemaphorePermit, Semaphore};

/// Bounded pool of concurrency slots
#[derive(Debug)]
pub struct ConcurrencySlots {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    peak_in_use: AtomicUsize,
}

impl ConcurrencySlots {
    /// Creates a pool with `capacity` slots; zero means every visit runs inline
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            peak_in_use: AtomicUsize::new(0),
        }
    }

    /// Takes a slot if one is free, without waiting
    ///
    /// The slot is returned to the pool when the permit is dropped.
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        let permit = Arc::clone(&self.semaphore).try_acquire_owned().ok()?;
        let in_use = self.capacity - self.semaphore.available_permits();
        self.peak_in_use.fetch_max(in_use, Ordering::Relaxed);
        Some(permit)
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Highest number of slots observed in use at once
    pub fn peak_in_use(&self) -> usize {
        self.peak_in_use.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
struct PendingState {
    count: AtomicUsize,
    drained: Notify,
}

/// Counter of scheduled-but-unfinished visits
#[derive(Debug, Clone, Default)]
pub struct PendingWork {
    state: Arc<PendingState>,
}

impl PendingWork {
    /// Creates a tracker with no pending work
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one unit of pending work
    ///
    /// The unit is released when the returned guard is dropped, so it is
    /// released exactly once whichever way the visit body exits.
    pub fn register(&self) -> WorkGuard {
        self.state.count.fetch_add(1, Ordering::SeqCst);
        WorkGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// Number of units currently registered
    pub fn pending(&self) -> usize {
        self.state.count.load(Ordering::SeqCst)
    }

    /// Waits until every registered unit has been released
    ///
    /// Returns immediately if nothing is pending.
    pub async fn wait(&self) {
        loop {
            // Created before the check so a release in between still wakes us
            let drained = self.state.drained.notified();
            if self.state.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            drained.await;
        }
    }
}

/// One registered unit of pending work
#[derive(Debug)]
#[must_use = "pending work is released as soon as the guard is dropped"]
pub struct WorkGuard {
    state: Arc<PendingState>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.state.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.drained.notify_waiters();
        }
    }
}
