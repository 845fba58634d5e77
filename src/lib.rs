//! UA-Census: a user-agent catalogue scraper and bot-heuristic checker
//!
//! This crate scrapes a reference page listing browser and crawler user-agent
//! strings into a flat JSON file, and measures how well a bot heuristic
//! classifies the strings in such a file.

pub mod accuracy;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for UA-Census operations
#[derive(Debug, Error)]
pub enum CensusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Result channel closed before record for '{title}' was delivered")]
    ResultsClosed { title: String },

    #[error("Scheduler task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Per-request fetch errors
///
/// These never abort a crawl; they are reported on the scheduler's error
/// stream and logged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request queue rejected {url}")]
    QueueFull { url: String },

    #[error("Handler failed for {url}: {source}")]
    Handler { url: String, source: Box<CensusError> },
}

/// Record file errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for UA-Census operations
pub type Result<T> = std::result::Result<T, CensusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for record file operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use accuracy::{AccuracyReport, BotClassifier, IsBotClassifier};
pub use config::Config;
pub use record::UserAgentRecord;
