//! HTTP response messages stored in `response` records

use crate::warc::{find_header, split_header_line, ArchiveError, ArchiveResult};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// A parsed HTTP response message
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    /// Payload exactly as stored, before transfer or content decoding
    pub payload: Vec<u8>,
}

impl HttpResponse {
    /// Parses the status line, headers and payload of an HTTP message
    ///
    /// A block without a header terminator is treated as headers only.
    pub fn parse(index: usize, block: &[u8]) -> ArchiveResult<Self> {
        let (head, payload) = match find_head_end(block) {
            Some((head_end, payload_start)) => (&block[..head_end], &block[payload_start..]),
            None => (block, &block[block.len()..]),
        };

        let head = String::from_utf8_lossy(head);
        let mut lines = head.split('\n').map(|line| line.trim_end_matches('\r'));

        let status_line = lines.next().unwrap_or_default();
        let status_code = parse_status_line(status_line).ok_or_else(|| {
            ArchiveError::InvalidStatusLine {
                index,
                line: status_line.to_string(),
            }
        })?;

        // Unparseable header lines are dropped; servers send all sorts
        let headers = lines.filter_map(split_header_line).collect();

        Ok(Self {
            status_code,
            headers,
            payload: payload.to_vec(),
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Payload with transfer and content encodings removed
    ///
    /// Each decoding step falls back to its input if the payload turns out
    /// not to be encoded the way the headers claim.
    pub fn decoded_payload(&self) -> Vec<u8> {
        let mut payload = self.payload.clone();

        let chunked = self
            .header("Transfer-Encoding")
            .map(|v| v.to_ascii_lowercase().contains("chunked"))
            .unwrap_or(false);
        if chunked {
            if let Some(dechunked) = dechunk(&payload) {
                payload = dechunked;
            }
        }

        let encoding = self
            .header("Content-Encoding")
            .map(|v| v.trim().to_ascii_lowercase());
        let inflated = match encoding.as_deref() {
            Some("gzip") | Some("x-gzip") => read_all(GzDecoder::new(payload.as_slice())),
            Some("deflate") => read_all(ZlibDecoder::new(payload.as_slice())),
            // Other codings such as `br` are left as stored
            _ => None,
        };

        inflated.unwrap_or(payload)
    }

    /// Decoded payload as text; invalid UTF-8 sequences are replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.decoded_payload()).into_owned()
    }
}

/// Returns (end of head, start of payload)
///
/// The head ends at the first empty line, whether it is terminated by
/// `\r\n` or a bare `\n`.
fn find_head_end(block: &[u8]) -> Option<(usize, usize)> {
    let mut line_start = 0;
    while let Some(offset) = block[line_start..].iter().position(|&b| b == b'\n') {
        let line_end = line_start + offset;
        let line = &block[line_start..line_end];
        if line.is_empty() || line == b"\r" {
            return Some((line_start, line_end + 1));
        }
        line_start = line_end + 1;
    }
    None
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Extracts the code from a line like `HTTP/1.1 200 OK`
fn parse_status_line(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    let protocol = parts.next()?;
    if !protocol.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

/// Removes chunked transfer framing; `None` if the framing is invalid
fn dechunk(payload: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    let mut rest = payload;

    loop {
        let line_end = find_subslice(rest, b"\r\n")?;
        let size_line = std::str::from_utf8(&rest[..line_end]).ok()?;
        let size_hex = size_line.split(';').next()?.trim();
        let size = usize::from_str_radix(size_hex, 16).ok()?;
        rest = &rest[line_end + 2..];

        if size == 0 {
            return Some(out);
        }
        if rest.len() < size {
            return None;
        }
        out.extend_from_slice(&rest[..size]);
        rest = rest[size..].strip_prefix(b"\r\n").unwrap_or(&rest[size..]);
    }
}

fn read_all<R: Read>(mut reader: R) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out).ok()?;
    Some(out)
}
