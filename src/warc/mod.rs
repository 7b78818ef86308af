//! WARC archive reading
//!
//! This module provides a streaming reader for WARC/1.0 and WARC/1.1 files:
//! - Framing records by their `Content-Length`
//! - Case-insensitive access to named record headers
//! - Parsing the HTTP message stored in `response` records
//! - Decoding chunked and compressed payloads into text

mod http;
mod reader;
mod record;

pub use http::HttpResponse;
pub use reader::WarcReader;
pub use record::{ArchiveRecord, RecordType};

use thiserror::Error;

/// Header carrying the record type
pub const WARC_TYPE: &str = "WARC-Type";

/// Header carrying the capture timestamp
pub const WARC_DATE: &str = "WARC-Date";

/// Header carrying the captured URI
pub const WARC_TARGET_URI: &str = "WARC-Target-URI";

/// Header carrying the block length in bytes
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Errors that can occur while reading an archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record {index}: expected a WARC version line, found {line:?}")]
    InvalidVersion { index: usize, line: String },

    #[error("Record {index}: malformed header line {line:?}")]
    MalformedHeader { index: usize, line: String },

    #[error("Record {index}: header section ended before a blank line")]
    UnterminatedHeaders { index: usize },

    #[error("Record {index}: missing {header} header")]
    MissingHeader { index: usize, header: &'static str },

    #[error("Record {index}: invalid Content-Length {value:?}")]
    InvalidContentLength { index: usize, value: String },

    #[error("Record {index}: truncated block, expected {expected} bytes but read {actual}")]
    Truncated {
        index: usize,
        expected: u64,
        actual: u64,
    },

    #[error("Record {index}: invalid HTTP status line {line:?}")]
    InvalidStatusLine { index: usize, line: String },
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Parses a `Name: value` header line, trimming whitespace around the value
pub(crate) fn split_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Finds a header value by case-insensitive name
pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_line() {
        assert_eq!(
            split_header_line("WARC-Type: response"),
            Some(("WARC-Type".to_string(), "response".to_string()))
        );
        assert_eq!(
            split_header_line("WARC-Target-URI: http://example.com/robots.txt"),
            Some((
                "WARC-Target-URI".to_string(),
                "http://example.com/robots.txt".to_string()
            ))
        );
        assert_eq!(split_header_line("no colon here"), None);
        assert_eq!(split_header_line(": value"), None);
    }

    #[test]
    fn test_find_header_case_insensitive() {
        let headers = vec![("content-length".to_string(), "12".to_string())];
        assert_eq!(find_header(&headers, CONTENT_LENGTH), Some("12"));
        assert_eq!(find_header(&headers, WARC_DATE), None);
    }
}
