//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedRegistry`: normalized URL to visit count, shared by every visit
//! - `VisitOutcome`: result of recording a visit under a hard page budget

mod registry;

// Re-export main types
pub use registry::{VisitOutcome, VisitedRegistry};
