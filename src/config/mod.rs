//! Configuration module for Crawlit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Command-line arguments are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use crawlit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawlit.toml")).unwrap();
//! println!("Crawler will use {} slots", config.crawler.max_concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, DEFAULT_USER_AGENT};

// Re-export parser and validation functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, validate_seed, MAX_CONCURRENCY_LIMIT};
