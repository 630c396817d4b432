//! Response definitions
//!
//! The fixed bytes a session may emit and the status it exits with.

/// Written to the output after a successful set
pub const ACK: &[u8] = b"OK\n";

/// Written to the error stream for malformed or unsatisfiable requests
pub const INVALID_MESSAGE: &[u8] = b"Invalid Command\n";

/// Written to the error stream for I/O failures under a well-formed request
pub const OPERATION_FAILED_MESSAGE: &[u8] = b"Operation Failed\n";

/// Outcome of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Invalid,
    OperationFailed,
}

impl Status {
    /// Process exit code for this status
    pub fn exit_code(&self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Invalid | Status::OperationFailed => 1,
        }
    }

    /// Message for the error stream, if any
    pub fn message(&self) -> Option<&'static [u8]> {
        match self {
            Status::Ok => None,
            Status::Invalid => Some(INVALID_MESSAGE),
            Status::OperationFailed => Some(OPERATION_FAILED_MESSAGE),
        }
    }
}
