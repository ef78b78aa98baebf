//! Configuration module for ekimae
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. A minimal config only needs the page-URL template; every other
//! knob (pacing, retries, selectors, sink paths) has a default.
//!
//! # Example
//!
//! ```no_run
//! use ekimae::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Pacing: {}ms", config.crawl.pacing_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, OutputConfig, SelectorConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
