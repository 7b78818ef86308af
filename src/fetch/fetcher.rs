//! HTTP archive fetcher
//!
//! This module downloads the compressed archive:
//! - Building an HTTP client from the configured timeouts and user agent
//! - GET request for the whole archive
//! - Multi-member gzip decompression in memory
//! - Writing the decompressed archive to local storage
//!
//! Nothing is written unless the download and the decompression both succeed.

use crate::config::HttpConfig;
use crate::{CensusError, Result};
use flate2::read::MultiGzDecoder;
use reqwest::{Client, StatusCode};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A successfully stored archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDownload {
    /// Where the decompressed archive was written
    pub path: PathBuf,
    /// Size of the response body
    pub compressed_bytes: usize,
    /// Size of the file written
    pub decompressed_bytes: usize,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use robots_census::config::HttpConfig;
/// use robots_census::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

/// Decompresses every gzip member of `data`
///
/// Archives are commonly published with one gzip member per record, so a
/// single-member decoder would stop after the first record.
pub fn decompress_gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Downloads a gzip-compressed archive and stores it decompressed at `dest`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The archive URL
/// * `dest` - Path of the decompressed file; parent directories are created
///
/// # Returns
///
/// * `Ok(ArchiveDownload)` - The archive was written to `dest`
/// * `Err(CensusError::Http)` - Transport failure
/// * `Err(CensusError::FetchStatus)` - Any status other than 200
/// * `Err(CensusError::Decompress)` - The body is not valid gzip
/// * `Err(CensusError::Io)` - The file could not be written
pub async fn fetch_archive(client: &Client, url: &str, dest: &Path) -> Result<ArchiveDownload> {
    tracing::info!("Downloading archive from {}", url);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            tracing::warn!("Request timeout for {}", url);
        } else if e.is_connect() {
            tracing::warn!("Connection failed for {}", url);
        }
        CensusError::Http {
            url: url.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::error!(
            "Failed to download the file. Status code: {}",
            status.as_u16()
        );
        return Err(CensusError::FetchStatus {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| CensusError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let decompressed = decompress_gzip(&body).map_err(|e| CensusError::Decompress {
        url: url.to_string(),
        source: e,
    })?;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(dest, &decompressed).await?;

    tracing::info!(
        "File downloaded and decompressed to: {} ({} -> {} bytes)",
        dest.display(),
        body.len(),
        decompressed.len()
    );

    Ok(ArchiveDownload {
        path: dest.to_path_buf(),
        compressed_bytes: body.len(),
        decompressed_bytes: decompressed.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_decompress_multi_member() {
        let mut data = gzip(b"first record\n");
        data.extend(gzip(b"second record\n"));

        let out = decompress_gzip(&data).unwrap();
        assert_eq!(out, b"first record\nsecond record\n");
    }

    #[test]
    fn test_decompress_rejects_plain_bytes() {
        assert!(decompress_gzip(b"WARC/1.0\r\n").is_err());
    }

    #[tokio::test]
    async fn test_fetch_archive_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/archive.warc.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(b"WARC/1.0\r\n")))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raw").join("input.warc");
        let client = build_http_client(&HttpConfig::default()).unwrap();

        let download = fetch_archive(&client, &format!("{}/archive.warc.gz", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(download.path, dest);
        assert_eq!(download.decompressed_bytes, 10);
        assert_eq!(std::fs::read(&dest).unwrap(), b"WARC/1.0\r\n");
    }

    #[tokio::test]
    async fn test_fetch_archive_non_200_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("input.warc");
        let client = build_http_client(&HttpConfig::default()).unwrap();

        let err = fetch_archive(&client, &format!("{}/missing.warc.gz", server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, CensusError::FetchStatus { status_code: 404, .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_fetch_archive_bad_gzip_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not gzip".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("input.warc");
        let client = build_http_client(&HttpConfig::default()).unwrap();

        let err = fetch_archive(&client, &server.uri(), &dest).await.unwrap_err();

        assert!(matches!(err, CensusError::Decompress { .. }));
        assert!(!dest.exists());
    }
}
