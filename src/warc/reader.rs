//! Streaming WARC record reader
//!
//! Records are framed as a version line, a block of `Name: value` headers,
//! a blank line, exactly `Content-Length` bytes of block, and a trailing
//! CRLF pair. Blank lines between records are tolerated.

use crate::warc::record::ArchiveRecord;
use crate::warc::{find_header, split_header_line, ArchiveError, ArchiveResult, CONTENT_LENGTH};
use std::io::{BufRead, Read};

/// Iterates the records of a WARC file in file order
pub struct WarcReader<R> {
    reader: R,
    index: usize,
    done: bool,
}

impl<R: BufRead> WarcReader<R> {
    /// Creates a reader over any buffered byte source
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            index: 0,
            done: false,
        }
    }

    /// Reads one line, without its line terminator
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self) -> ArchiveResult<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Reads the next record, or `None` when the archive is exhausted
    pub fn read_record(&mut self) -> ArchiveResult<Option<ArchiveRecord>> {
        let index = self.index;

        let version = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };

        if !version.starts_with("WARC/") {
            return Err(ArchiveError::InvalidVersion {
                index,
                line: version,
            });
        }

        let mut headers: Vec<(String, String)> = Vec::new();
        loop {
            let line = self
                .read_line()?
                .ok_or(ArchiveError::UnterminatedHeaders { index })?;

            if line.is_empty() {
                break;
            }

            // Folded continuation of the previous header value
            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some((_, value)) = headers.last_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                    continue;
                }
            }

            let header =
                split_header_line(&line).ok_or(ArchiveError::MalformedHeader { index, line })?;
            headers.push(header);
        }

        let length_value = find_header(&headers, CONTENT_LENGTH).ok_or(
            ArchiveError::MissingHeader {
                index,
                header: CONTENT_LENGTH,
            },
        )?;
        let expected: u64 =
            length_value
                .parse()
                .map_err(|_| ArchiveError::InvalidContentLength {
                    index,
                    value: length_value.to_string(),
                })?;

        let mut block = Vec::new();
        let actual = (&mut self.reader).take(expected).read_to_end(&mut block)? as u64;
        if actual != expected {
            return Err(ArchiveError::Truncated {
                index,
                expected,
                actual,
            });
        }

        self.index += 1;
        Ok(Some(ArchiveRecord::new(index, version, headers, block)))
    }
}

impl<R: BufRead> Iterator for WarcReader<R> {
    type Item = ArchiveResult<ArchiveRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // Framing is lost after an error
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
