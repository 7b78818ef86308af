//! Extraction session: one pass over an archive
//!
//! The session owns the record list and the status counters for the lifetime
//! of a single run and hands them back as an [`Extraction`] when finished.

use crate::config::MalformedUriPolicy;
use crate::robots::{count_rules, AgentRule};
use crate::warc::{ArchiveRecord, WarcReader};
use crate::{CensusError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Facts extracted from one HTTP response record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    /// Capture timestamp as written in the archive
    pub fetched_date: String,
    pub domain: String,
    pub http_code: u16,
    /// One entry per user-agent block; empty unless `http_code` is 200
    pub agents: Vec<AgentRule>,
}

impl ResponseRecord {
    pub fn is_ok(&self) -> bool {
        self.http_code == 200
    }
}

/// Result of a finished extraction session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Response records in archive order
    pub records: Vec<ResponseRecord>,
    /// Responses with status 200
    pub ok_count: u64,
    /// Responses with any other status
    pub non_ok_count: u64,
    /// Responses left out because their target URI had no authority
    pub skipped: u64,
}

/// Stateful single pass over an archive
#[derive(Debug)]
pub struct ExtractionSession {
    policy: MalformedUriPolicy,
    extraction: Extraction,
    seen: u64,
}

impl ExtractionSession {
    pub fn new(policy: MalformedUriPolicy) -> Self {
        Self {
            policy,
            extraction: Extraction::default(),
            seen: 0,
        }
    }

    /// Processes one archive entry; non-response entries are ignored
    pub fn process(&mut self, record: &ArchiveRecord) -> Result<()> {
        self.seen += 1;
        if !record.is_response() {
            tracing::trace!(
                "Record {}: ignoring {:?} entry ({})",
                record.index(),
                record.record_type(),
                record.version()
            );
            return Ok(());
        }

        let target_uri = record.target_uri()?;
        let domain = match extract_domain(target_uri) {
            Some(domain) => domain.to_string(),
            None => match self.policy {
                MalformedUriPolicy::Abort => {
                    return Err(CensusError::MalformedUri {
                        uri: target_uri.to_string(),
                    })
                }
                MalformedUriPolicy::Skip => {
                    tracing::warn!(
                        "Skipping record {}: target URI {:?} has no authority segment",
                        record.index(),
                        target_uri
                    );
                    self.extraction.skipped += 1;
                    return Ok(());
                }
            },
        };

        let fetched_date = record.date()?.to_string();
        let response = record.http_response()?;
        let http_code = response.status_code;

        let agents = if http_code == 200 {
            self.extraction.ok_count += 1;
            count_rules(&response.text())
        } else {
            self.extraction.non_ok_count += 1;
            Vec::new()
        };

        tracing::trace!(
            "Record {}: {} -> {} ({} agent blocks)",
            record.index(),
            domain,
            http_code,
            agents.len()
        );

        self.extraction.records.push(ResponseRecord {
            fetched_date,
            domain,
            http_code,
            agents,
        });

        Ok(())
    }

    /// Consumes the session and returns what it extracted
    pub fn finish(self) -> Extraction {
        tracing::debug!(
            "Extraction session saw {} archive entries, kept {} responses",
            self.seen,
            self.extraction.records.len()
        );
        self.extraction
    }
}

/// Extracts the authority of a URI of the form `scheme://host/path`
///
/// This is the third `/`-separated segment, kept verbatim (including any port
/// or credentials). Returns `None` when the URI has fewer than three segments.
///
/// # Examples
///
/// ```
/// use robots_census::extract::extract_domain;
///
/// assert_eq!(extract_domain("http://example.com/robots.txt"), Some("example.com"));
/// assert_eq!(extract_domain("https://example.com:8443/robots.txt"), Some("example.com:8443"));
/// assert_eq!(extract_domain("example.com/robots.txt"), None);
/// ```
pub fn extract_domain(uri: &str) -> Option<&str> {
    uri.split('/').nth(2)
}

/// Runs a full extraction over any buffered WARC byte source
pub fn extract_from<R: BufRead>(reader: R, policy: MalformedUriPolicy) -> Result<Extraction> {
    let mut session = ExtractionSession::new(policy);
    for record in WarcReader::new(reader) {
        session.process(&record?)?;
    }
    Ok(session.finish())
}

/// Runs a full extraction over a decompressed archive file
pub fn extract_file(path: &Path, policy: MalformedUriPolicy) -> Result<Extraction> {
    if !path.exists() {
        return Err(CensusError::MissingArchive {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    extract_from(BufReader::new(file), policy)
}
