//! Configuration module for Robots-Census
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults of
//! the CC-MAIN-2023-14 robots.txt census.
//!
//! # Example
//!
//! ```no_run
//! use robots_census::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("census.toml")).unwrap();
//! println!("Archive will be written to: {}", config.archive_path().display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractConfig, HttpConfig, MalformedUriPolicy, PathsConfig, SourceConfig,
    ARCHIVE_FILE_NAME, DEFAULT_SOURCE_URL, OUTPUT_FILE_NAME, STATS_FILE_NAME,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
