//! Archive fetching module
//!
//! Retrieves the compressed archive over HTTP and leaves a decompressed copy
//! on local storage for the extractor.

mod fetcher;

pub use fetcher::{build_http_client, decompress_gzip, fetch_archive, ArchiveDownload};
