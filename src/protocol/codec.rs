//! Protocol codec
//!
//! Parses request headers off the input stream.
//!
//! ## Wire Format
//!
//! ```text
//! get LF <location> LF [whitespace...]
//! set LF <location> LF <length> LF <body: length bytes>
//! ```
//!
//! Every header line must end in LF. Trailing spaces, tabs and carriage
//! returns are trimmed before a header is interpreted.

use std::ffi::OsStr;
use std::io::Read;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{InvalidRequest, Result};

use super::line::{read_line, Line, LineError};
use super::{CommandType, Header, Request};

// =============================================================================
// Request Decoding
// =============================================================================

/// Read a complete request header block from a stream
///
/// Blocks until every header line of the request is read. For a set request
/// the stream is left positioned at the first body byte.
pub fn read_request<R: Read + ?Sized>(reader: &mut R, config: &Config) -> Result<Request> {
    match read_command(reader, config)? {
        CommandType::Get => {
            let location = read_location(reader, config)?;
            Ok(Request::Get { location })
        }
        CommandType::Set => {
            let location = read_location(reader, config)?;
            let content_length = read_content_length(reader, config)?;
            Ok(Request::Set {
                location,
                content_length,
            })
        }
    }
}

/// Read the command line and identify the operation
pub fn read_command<R: Read + ?Sized>(reader: &mut R, config: &Config) -> Result<CommandType> {
    let line = read_header(reader, config, Header::Command)?;

    CommandType::parse(line.as_bytes()).ok_or_else(|| {
        InvalidRequest::UnknownCommand(String::from_utf8_lossy(line.as_bytes()).into_owned())
            .into()
    })
}

/// Read the location line
pub fn read_location<R: Read + ?Sized>(reader: &mut R, config: &Config) -> Result<PathBuf> {
    let line = read_header(reader, config, Header::Location)?;
    parse_location(line.as_bytes(), config.max_location_len)
}

/// Read the content length line
pub fn read_content_length<R: Read + ?Sized>(reader: &mut R, config: &Config) -> Result<u64> {
    let line = read_header(reader, config, Header::ContentLength)?;

    parse_content_length(line.as_bytes()).ok_or_else(|| {
        InvalidRequest::BadContentLength(String::from_utf8_lossy(line.as_bytes()).into_owned())
            .into()
    })
}

// =============================================================================
// Field Parsing
// =============================================================================

/// Validate a location and turn it into a path
///
/// Locations are raw bytes; they need not be UTF-8.
pub fn parse_location(bytes: &[u8], max_len: usize) -> Result<PathBuf> {
    if bytes.is_empty() {
        return Err(InvalidRequest::EmptyHeader(Header::Location).into());
    }

    if bytes.len() >= max_len {
        return Err(InvalidRequest::LocationTooLong {
            len: bytes.len(),
            max: max_len,
        }
        .into());
    }

    if bytes.contains(&0) {
        return Err(InvalidRequest::LocationNul.into());
    }

    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

/// Parse a content length: base-10 digits only, no sign, fits in `i64`
pub fn parse_content_length(text: &[u8]) -> Option<u64> {
    if text.is_empty() || !text.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: u64 = std::str::from_utf8(text).ok()?.parse().ok()?;
    (value <= i64::MAX as u64).then_some(value)
}

/// Read one required, non-empty header line
fn read_header<R: Read + ?Sized>(reader: &mut R, config: &Config, header: Header) -> Result<Line> {
    let mut line = Line::with_capacity(config.line_capacity);

    match read_line(reader, &mut line, true) {
        Ok(0) => Err(InvalidRequest::EmptyHeader(header).into()),
        Ok(_) => Ok(line),
        Err(LineError::Truncated) => Err(InvalidRequest::TruncatedHeader(header).into()),
        Err(LineError::Read(source)) => Err(InvalidRequest::HeaderRead { header, source }.into()),
    }
}
