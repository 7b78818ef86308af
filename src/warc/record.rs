use crate::warc::http::HttpResponse;
use crate::warc::{find_header, ArchiveError, ArchiveResult, WARC_DATE, WARC_TARGET_URI, WARC_TYPE};

/// Value of the `WARC-Type` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordType {
    WarcInfo,
    Response,
    Resource,
    Request,
    Metadata,
    Revisit,
    Conversion,
    Continuation,
    /// A type this reader does not know, or a record without `WARC-Type`
    Other(String),
}

impl RecordType {
    /// Parses a `WARC-Type` value (case-insensitive)
    pub fn from_header(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "warcinfo" => RecordType::WarcInfo,
            "response" => RecordType::Response,
            "resource" => RecordType::Resource,
            "request" => RecordType::Request,
            "metadata" => RecordType::Metadata,
            "revisit" => RecordType::Revisit,
            "conversion" => RecordType::Conversion,
            "continuation" => RecordType::Continuation,
            _ => RecordType::Other(value.to_string()),
        }
    }
}

/// One entry of a WARC file
///
/// The block is kept as raw bytes; the HTTP message inside a `response`
/// record is parsed on demand with [`ArchiveRecord::http_response`].
#[derive(Debug, Clone)]
pub struct ArchiveRecord {
    index: usize,
    version: String,
    headers: Vec<(String, String)>,
    block: Vec<u8>,
}

impl ArchiveRecord {
    pub(crate) fn new(
        index: usize,
        version: String,
        headers: Vec<(String, String)>,
        block: Vec<u8>,
    ) -> Self {
        Self {
            index,
            version,
            headers,
            block,
        }
    }

    /// Zero-based position of the record in its archive
    pub fn index(&self) -> usize {
        self.index
    }

    /// The version line, e.g. `WARC/1.0`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up a record header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn record_type(&self) -> RecordType {
        self.header(WARC_TYPE)
            .map(RecordType::from_header)
            .unwrap_or_else(|| RecordType::Other(String::new()))
    }

    pub fn is_response(&self) -> bool {
        self.record_type() == RecordType::Response
    }

    /// Capture timestamp, exactly as written in the archive
    pub fn date(&self) -> ArchiveResult<&str> {
        self.require_header(WARC_DATE)
    }

    /// URI that was captured
    pub fn target_uri(&self) -> ArchiveResult<&str> {
        self.require_header(WARC_TARGET_URI)
    }

    pub fn block(&self) -> &[u8] {
        &self.block
    }

    /// Parses the block as an HTTP response message
    pub fn http_response(&self) -> ArchiveResult<HttpResponse> {
        HttpResponse::parse(self.index, &self.block)
    }

    fn require_header(&self, header: &'static str) -> ArchiveResult<&str> {
        self.header(header).ok_or(ArchiveError::MissingHeader {
            index: self.index,
            header,
        })
    }
}
