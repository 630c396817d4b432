//! Line Reader Tests
//!
//! Tests for header line framing, trimming and bounds.

use std::io::{self, Cursor, Read};

use memory::protocol::{read_line, Line, LineError};

// =============================================================================
// Helper Functions
// =============================================================================

fn read(input: &[u8], capacity: usize, require_newline: bool) -> (Result<usize, LineError>, Line, u64) {
    let mut cursor = Cursor::new(input.to_vec());
    let mut line = Line::with_capacity(capacity);
    let result = read_line(&mut cursor, &mut line, require_newline);
    (result, line, cursor.position())
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

// =============================================================================
// Framing Tests
// =============================================================================

#[test]
fn test_reads_up_to_newline() {
    let (result, line, consumed) = read(b"get\n/tmp/file\n", 4096, true);

    assert_eq!(result.unwrap(), 3);
    assert_eq!(line.as_bytes(), b"get");
    // The delimiter is consumed, nothing after it
    assert_eq!(consumed, 4);
}

#[test]
fn test_does_not_read_past_newline() {
    let mut cursor = Cursor::new(b"set\nhello".to_vec());
    let mut line = Line::with_capacity(4096);

    read_line(&mut cursor, &mut line, true).unwrap();

    let mut rest = Vec::new();
    cursor.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"hello");
}

#[test]
fn test_missing_newline_is_truncated() {
    let (result, _, _) = read(b"set", 4096, true);
    assert!(matches!(result, Err(LineError::Truncated)));
}

#[test]
fn test_missing_newline_allowed_when_not_required() {
    let (result, line, _) = read(b"set", 4096, false);

    assert_eq!(result.unwrap(), 3);
    assert_eq!(line.as_bytes(), b"set");
}

#[test]
fn test_empty_stream() {
    let (required, _, _) = read(b"", 4096, true);
    assert!(matches!(required, Err(LineError::Truncated)));

    let (optional, line, _) = read(b"", 4096, false);
    assert_eq!(optional.unwrap(), 0);
    assert!(line.is_empty());
}

#[test]
fn test_blank_line() {
    let (result, line, _) = read(b"\n", 4096, true);

    assert_eq!(result.unwrap(), 0);
    assert!(line.is_empty());
}

// =============================================================================
// Trimming Tests
// =============================================================================

#[test]
fn test_trims_trailing_blanks() {
    let (result, line, _) = read(b"get \t\r \n", 4096, true);

    assert_eq!(result.unwrap(), 3);
    assert_eq!(line.as_bytes(), b"get");
}

#[test]
fn test_keeps_leading_and_inner_whitespace() {
    let (result, line, _) = read(b"  my file\tname  \n", 4096, true);

    assert_eq!(result.unwrap(), 14);
    assert_eq!(line.as_bytes(), b"  my file\tname");
}

#[test]
fn test_only_blanks_trims_to_empty() {
    let (result, line, _) = read(b" \t\r\n", 4096, true);

    assert_eq!(result.unwrap(), 0);
    assert!(line.is_empty());
}

#[test]
fn test_other_whitespace_is_not_trimmed() {
    // Vertical tab and form feed are content, not trailing blanks
    let (_, line, _) = read(b"name\x0b\x0c\n", 4096, true);
    assert_eq!(line.as_bytes(), b"name\x0b\x0c");
}

// =============================================================================
// Bound Tests
// =============================================================================

#[test]
fn test_line_shorter_than_limit() {
    // Capacity 8 stores at most 7 bytes
    let (result, line, _) = read(b"abcdef\n", 8, true);

    assert_eq!(result.unwrap(), 6);
    assert_eq!(line.as_bytes(), b"abcdef");
}

#[test]
fn test_line_filling_limit_is_truncated() {
    // The reader stops once full and never sees the newline
    let (result, line, consumed) = read(b"abcdefg\n", 8, true);

    assert!(matches!(result, Err(LineError::Truncated)));
    assert_eq!(line.len(), 7);
    assert_eq!(consumed, 7);
}

#[test]
fn test_overlong_line_is_truncated() {
    let (result, line, _) = read(b"abcdefghijklmnop\n", 8, true);

    assert!(matches!(result, Err(LineError::Truncated)));
    assert!(line.len() <= line.limit());
}

#[test]
fn test_overlong_line_without_newline_requirement() {
    let (result, line, consumed) = read(b"abcdefghij", 8, false);

    assert_eq!(result.unwrap(), 7);
    assert_eq!(line.as_bytes(), b"abcdefg");
    assert_eq!(consumed, 7);
}

#[test]
fn test_line_capacity_accessors() {
    let line = Line::with_capacity(4096);

    assert_eq!(line.capacity(), 4096);
    assert_eq!(line.limit(), 4095);
    assert!(!line.is_full());
}

// =============================================================================
// Stream Error Tests
// =============================================================================

#[test]
fn test_read_failure() {
    let mut line = Line::with_capacity(4096);
    let result = read_line(&mut FailingReader, &mut line, true);

    match result {
        Err(LineError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
        other => panic!("Expected read error, got {:?}", other),
    }
}

#[test]
fn test_interrupted_read_is_retried() {
    struct Flaky {
        data: Cursor<Vec<u8>>,
        interrupt: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    let mut reader = Flaky {
        data: Cursor::new(b"get\n".to_vec()),
        interrupt: false,
    };
    let mut line = Line::with_capacity(4096);

    assert_eq!(read_line(&mut reader, &mut line, true).unwrap(), 3);
    assert_eq!(line.as_bytes(), b"get");
}

#[test]
fn test_line_is_reusable() {
    let mut cursor = Cursor::new(b"first line\nsecond\n".to_vec());
    let mut line = Line::with_capacity(4096);

    read_line(&mut cursor, &mut line, true).unwrap();
    assert_eq!(line.as_bytes(), b"first line");

    read_line(&mut cursor, &mut line, true).unwrap();
    assert_eq!(line.as_bytes(), b"second");
}
