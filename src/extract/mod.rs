//! Record extraction
//!
//! Walks a decompressed archive in file order, keeps the HTTP `response`
//! records, and counts the robots.txt rules of every successful fetch.

mod session;

pub use session::{
    extract_domain, extract_file, extract_from, Extraction, ExtractionSession, ResponseRecord,
};
