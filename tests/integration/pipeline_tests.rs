//! Integration tests for the census pipeline
//!
//! These tests use wiremock to serve a gzipped archive and run the full
//! fetch → extract → flatten → aggregate cycle end-to-end.

use flate2::write::GzEncoder;
use flate2::Compression;
use robots_census::config::{load_config, Config, MalformedUriPolicy};
use robots_census::pipeline::{run, RunOptions};
use robots_census::CensusError;
use std::io::Write;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_PATH: &str = "/crawl-data/robotstxt/segment-00001.warc.gz";

/// Builds one WARC record around `block`
fn warc_record(record_type: &str, uri: &str, date: &str, block: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"WARC/1.0\r\n");
    out.extend_from_slice(format!("WARC-Type: {}\r\n", record_type).as_bytes());
    out.extend_from_slice(format!("WARC-Date: {}\r\n", date).as_bytes());
    out.extend_from_slice(format!("WARC-Target-URI: {}\r\n", uri).as_bytes());
    out.extend_from_slice(b"Content-Type: application/http; msgtype=response\r\n");
    out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", block.len()).as_bytes());
    out.extend_from_slice(block);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

fn response(uri: &str, date: &str, status: u16, body: &str) -> Vec<u8> {
    let block = format!(
        "HTTP/1.1 {} Whatever\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    warc_record("response", uri, date, block.as_bytes())
}

fn request(uri: &str, date: &str) -> Vec<u8> {
    warc_record(
        "request",
        uri,
        date,
        b"GET /robots.txt HTTP/1.1\r\nUser-Agent: CCBot/2.0\r\n\r\n",
    )
}

/// Compresses each record as its own gzip member
fn gzip_members(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for record in records {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(record).unwrap();
        out.extend(encoder.finish().unwrap());
    }
    out
}

fn sample_archive() -> Vec<u8> {
    gzip_members(&[
        request("http://alpha.com/robots.txt", "2023-04-02T10:50:53Z"),
        response(
            "http://alpha.com/robots.txt",
            "2023-04-02T10:50:54Z",
            200,
            "User-agent: *\nDisallow: /private\nDisallow: /tmp\n",
        ),
        request("https://beta.org/robots.txt", "2023-04-02T11:00:00Z"),
        response(
            "https://beta.org/robots.txt",
            "2023-04-02T11:00:01Z",
            200,
            "<html><body>No rules here</body></html>",
        ),
        request("http://gamma.net/robots.txt", "2023-04-03T00:10:00Z"),
        response(
            "http://gamma.net/robots.txt",
            "2023-04-03T00:10:01Z",
            404,
            "Not Found",
        ),
    ])
}

/// Creates a test configuration pointing at the mock server and a scratch dir
fn create_test_config(server: &MockServer, dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.url = format!("{}{}", server.uri(), ARCHIVE_PATH);
    config.paths.raw_dir = dir.join("raw").display().to_string();
    config.paths.extracted_dir = dir.join("extracted").display().to_string();
    config.paths.statistics_dir = dir.join("statistics").display().to_string();
    config
}

async fn serve(server: &MockServer, status: u16, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_census_run() {
    let server = MockServer::start().await;
    serve(&server, 200, sample_archive()).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    let summary = run(&config, RunOptions::default())
        .await
        .expect("census run failed");

    assert_eq!(summary.ok_count, 2);
    assert_eq!(summary.non_ok_count, 1);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.rows, 3);
    assert!(config.archive_path().exists());

    let output = std::fs::read_to_string(config.output_path()).unwrap();
    assert_eq!(
        output,
        ",fetched_date,domain,http_code,user_agent,disallow_count,allow_count\n\
         0,2023-04-02T10:50:54Z,alpha.com,200,*,2,0\n\
         1,2023-04-02T11:00:01Z,beta.org,200,,0,0\n\
         2,2023-04-03T00:10:01Z,gamma.net,404,,,\n"
    );

    let stats = std::fs::read_to_string(config.stats_path()).unwrap();
    assert_eq!(
        stats,
        ",date,total_errors,total_ok,total_distinct_ua,total_allows,total_disallows\n\
         0,2023-04-02,1,2,2,0,2\n\
         1,2023-04-03,1,2,1,0,0\n"
    );
}

#[tokio::test]
async fn test_fetch_failure_stops_pipeline() {
    let server = MockServer::start().await;
    serve(&server, 503, Vec::new()).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    let err = run(&config, RunOptions::default()).await.unwrap_err();

    assert!(matches!(
        err,
        CensusError::FetchStatus {
            status_code: 503,
            ..
        }
    ));
    assert!(!config.archive_path().exists());
    assert!(!config.output_path().exists());
    assert!(!config.stats_path().exists());
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let server = MockServer::start().await;
    serve(&server, 200, sample_archive()).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    run(&config, RunOptions::default()).await.unwrap();
    let first_output = std::fs::read(config.output_path()).unwrap();
    let first_stats = std::fs::read(config.stats_path()).unwrap();

    run(&config, RunOptions { skip_fetch: true }).await.unwrap();
    assert_eq!(std::fs::read(config.output_path()).unwrap(), first_output);
    assert_eq!(std::fs::read(config.stats_path()).unwrap(), first_stats);
}

#[tokio::test]
async fn test_multiple_agent_blocks_keep_their_order() {
    let server = MockServer::start().await;
    let archive = gzip_members(&[response(
        "http://multi.io/robots.txt",
        "2023-04-02T09:00:00Z",
        200,
        "User-agent: A\nDisallow: /x\nUser-agent: B\nAllow: /y",
    )]);
    serve(&server, 200, archive).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    run(&config, RunOptions::default()).await.unwrap();

    let output = std::fs::read_to_string(config.output_path()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "0,2023-04-02T09:00:00Z,multi.io,200,A,1,0");
    assert_eq!(lines[2], "1,2023-04-02T09:00:00Z,multi.io,200,B,0,1");
}

#[tokio::test]
async fn test_malformed_uri_policy_from_config_file() {
    let server = MockServer::start().await;
    let archive = gzip_members(&[
        response("robots.txt", "2023-04-02T09:00:00Z", 200, "User-agent: *\n"),
        response(
            "http://fine.com/robots.txt",
            "2023-04-02T09:00:01Z",
            200,
            "User-agent: *\n",
        ),
    ]);
    serve(&server, 200, archive).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("census.toml");
    std::fs::write(
        &config_path,
        format!(
            "[source]\nurl = \"{}{}\"\n\n[paths]\nraw-dir = {:?}\nextracted-dir = {:?}\nstatistics-dir = {:?}\n\n[extract]\non-malformed-uri = \"skip\"\n",
            server.uri(),
            ARCHIVE_PATH,
            dir.path().join("raw").display().to_string(),
            dir.path().join("extracted").display().to_string(),
            dir.path().join("statistics").display().to_string(),
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.extract.on_malformed_uri, MalformedUriPolicy::Skip);

    let summary = run(&config, RunOptions::default()).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.ok_count, 1);
    assert_eq!(summary.rows, 1);
}

#[tokio::test]
async fn test_malformed_uri_aborts_by_default() {
    let server = MockServer::start().await;
    let archive = gzip_members(&[response(
        "robots.txt",
        "2023-04-02T09:00:00Z",
        200,
        "User-agent: *\n",
    )]);
    serve(&server, 200, archive).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, dir.path());

    let err = run(&config, RunOptions::default()).await.unwrap_err();

    assert!(matches!(err, CensusError::MalformedUri { .. }));
    assert!(!config.output_path().exists());
}
