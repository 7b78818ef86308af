use serde::Deserialize;
use std::path::PathBuf;

/// Common Crawl robots.txt segment from the CC-MAIN-2023-14 crawl
pub const DEFAULT_SOURCE_URL: &str = "https://data.commoncrawl.org/crawl-data/CC-MAIN-2023-14/segments/1679296950528.96/robotstxt/CC-MAIN-20230402105054-20230402135054-00799.warc.gz";

/// Name of the decompressed archive inside the raw directory
pub const ARCHIVE_FILE_NAME: &str = "input.warc";

/// Name of the flat dataset inside the extracted directory
pub const OUTPUT_FILE_NAME: &str = "output.csv";

/// Name of the daily statistics file inside the statistics directory
pub const STATS_FILE_NAME: &str = "stats.csv";

/// Main configuration structure for Robots-Census
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Local path of the decompressed archive
    pub fn archive_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.raw_dir).join(ARCHIVE_FILE_NAME)
    }

    /// Local path of the flat dataset
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.extracted_dir).join(OUTPUT_FILE_NAME)
    }

    /// Local path of the daily statistics file
    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.paths.statistics_dir).join(STATS_FILE_NAME)
    }
}

/// Where the archive comes from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the gzip-compressed WARC file
    #[serde(default = "default_source_url")]
    pub url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
        }
    }
}

/// Local directories used by the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory receiving the decompressed archive
    #[serde(rename = "raw-dir", default = "default_raw_dir")]
    pub raw_dir: String,

    /// Directory receiving the flat dataset
    #[serde(rename = "extracted-dir", default = "default_extracted_dir")]
    pub extracted_dir: String,

    /// Directory receiving the daily statistics
    #[serde(rename = "statistics-dir", default = "default_statistics_dir")]
    pub statistics_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            extracted_dir: default_extracted_dir(),
            statistics_dir: default_statistics_dir(),
        }
    }
}

/// What to do with a response record whose target URI has no authority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedUriPolicy {
    /// Stop the run with an error
    #[default]
    Abort,
    /// Log a warning and leave the record out of the dataset and counters
    Skip,
}

/// Record extraction behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractConfig {
    #[serde(rename = "on-malformed-uri", default)]
    pub on_malformed_uri: MalformedUriPolicy,
}

/// HTTP client settings for the archive download
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with the download
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_raw_dir() -> String {
    "data/raw".to_string()
}

fn default_extracted_dir() -> String {
    "data/extracted".to_string()
}

fn default_statistics_dir() -> String {
    "data/statistics".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("robots-census/{}", env!("CARGO_PKG_VERSION"))
}
