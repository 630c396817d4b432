//! Header line reader
//!
//! Reads one header line a byte at a time so that nothing past the line's
//! delimiter is taken from the stream. A set body starts on the very next
//! byte, so the reader must never read ahead.

use std::io::{self, Read};

use bytes::{BufMut, BytesMut};
use thiserror::Error;

/// Failure reading a header line
#[derive(Debug, Error)]
pub enum LineError {
    /// The stream ended, or the buffer filled, before a newline was seen
    #[error("line not terminated by a newline")]
    Truncated,

    /// The underlying stream failed
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
}

/// A bounded buffer holding one header line
///
/// A line of capacity `C` keeps one slot in reserve and never holds more
/// than `C - 1` bytes.
#[derive(Debug, Clone)]
pub struct Line {
    buf: BytesMut,
    capacity: usize,
}

impl Line {
    /// Create an empty line with room for `capacity - 1` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity.saturating_sub(1)),
            capacity,
        }
    }

    /// Declared capacity, including the reserved slot
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most bytes this line can store
    pub fn limit(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.limit()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    fn push(&mut self, byte: u8) {
        if !self.is_full() {
            self.buf.put_u8(byte);
        }
    }

    /// Drop trailing spaces, tabs and carriage returns
    fn trim_end(&mut self) {
        let keep = self
            .buf
            .iter()
            .rposition(|&b| !is_trailing_blank(b))
            .map_or(0, |last| last + 1);
        self.buf.truncate(keep);
    }
}

/// Read one line from `reader` into `line`
///
/// Stops at a newline (consumed, not stored), at end of stream, or once the
/// line is full. With `require_newline`, stopping for any reason other than a
/// newline is [`LineError::Truncated`]. On success the line has its trailing
/// blanks trimmed and the trimmed length is returned.
pub fn read_line<R: Read + ?Sized>(
    reader: &mut R,
    line: &mut Line,
    require_newline: bool,
) -> Result<usize, LineError> {
    line.clear();
    let mut got_newline = false;

    while !line.is_full() {
        match read_byte(reader)? {
            None => break,
            Some(b'\n') => {
                got_newline = true;
                break;
            }
            Some(byte) => line.push(byte),
        }
    }

    if require_newline && !got_newline {
        return Err(LineError::Truncated);
    }

    line.trim_end();
    Ok(line.len())
}

fn read_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn is_trailing_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}
