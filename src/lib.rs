//! Robots-Census: crawl-policy statistics from a robots.txt WARC capture
//!
//! This crate downloads a single Web ARChive of robots.txt fetches, counts the
//! `Disallow:` and `Allow:` rules declared for every user agent, and writes a
//! flat per-record dataset together with per-day summary statistics.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod robots;
pub mod warc;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Robots-Census operations
#[derive(Debug, Error)]
pub enum CensusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to download {url}: status code {status_code}")]
    FetchStatus { url: String, status_code: u16 },

    #[error("Failed to decompress archive from {url}: {source}")]
    Decompress { url: String, source: std::io::Error },

    #[error("Archive file not found: {}", .path.display())]
    MissingArchive { path: PathBuf },

    #[error("Archive error: {0}")]
    Archive(#[from] warc::ArchiveError),

    #[error("Target URI has no authority segment: {uri:?}")]
    MalformedUri { uri: String },

    #[error("Unparseable fetch date: {value:?}")]
    InvalidDate { value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
}

/// Result type alias for Robots-Census operations
pub type Result<T> = std::result::Result<T, CensusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{Extraction, ExtractionSession, ResponseRecord};
pub use report::{DailyStat, FlatRow};
pub use robots::AgentRule;
