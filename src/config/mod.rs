//! Configuration module for UA-Census
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults matching the reference
//! user-agent listing site, so the crawler runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use ua_census::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("census.toml")).unwrap();
//! println!("Crawl deadline: {}s", config.crawler.deadline_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SelectorConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_optional_config};
pub use validation::validate;
