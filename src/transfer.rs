//! Transfer helpers
//!
//! Byte movement primitives shared by the get and set handlers: a writer
//! that never reports partial success, and a chunk reader that retries
//! interrupted reads.

use std::io::{self, Read, Write};

/// Write all of `buf`, looping over partial writes
///
/// Either every byte is accepted or the first failure is returned.
pub fn write_fully<W: Write + ?Sized>(writer: &mut W, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ))
            }
            Ok(n) => {
                buf = buf.get(n..).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        "writer reported more bytes than were offered",
                    )
                })?;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Read at most `buf.len()` bytes, returning how many were read
///
/// Zero means end of stream.
pub fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) if n <= buf.len() => return Ok(n),
            Ok(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "reader reported more bytes than were requested",
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Whitespace as the C locale's `isspace` sees it
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
