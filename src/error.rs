//! Error types for memory
//!
//! Every failure ends the request. Failures fall into exactly two classes:
//! the request itself was malformed ([`MemoryError::Invalid`]), or a system
//! resource failed underneath a well-formed request
//! ([`MemoryError::Operation`]). The class alone decides the fixed message
//! and exit status reported to the caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::{Header, Status};

/// Result type alias using MemoryError
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Unified error type for memory operations
#[derive(Debug, Error)]
pub enum MemoryError {
    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("invalid request: {0}")]
    Invalid(#[from] InvalidRequest),

    // -------------------------------------------------------------------------
    // Operational Errors
    // -------------------------------------------------------------------------
    #[error("operation failed while {stage}: {source}")]
    Operation {
        stage: Stage,
        #[source]
        source: io::Error,
    },
}

impl MemoryError {
    /// Wrap an I/O failure that happened at `stage`
    pub fn operation(stage: Stage, source: io::Error) -> Self {
        MemoryError::Operation { stage, source }
    }

    /// The response status this error is reported with
    pub fn status(&self) -> Status {
        match self {
            MemoryError::Invalid(_) => Status::Invalid,
            MemoryError::Operation { .. } => Status::OperationFailed,
        }
    }
}

/// Why a request was rejected
#[derive(Debug, Error)]
pub enum InvalidRequest {
    #[error("empty {0} header")]
    EmptyHeader(Header),

    #[error("{0} header not terminated by a newline")]
    TruncatedHeader(Header),

    #[error("failed to read {header} header: {source}")]
    HeaderRead {
        header: Header,
        #[source]
        source: io::Error,
    },

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("location is {len} bytes (limit {max})")]
    LocationTooLong { len: usize, max: usize },

    #[error("location contains a NUL byte")]
    LocationNul,

    #[error("content length {0:?} is not a non-negative integer")]
    BadContentLength(String),

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotRegularFile(PathBuf),

    #[error("non-whitespace data after get request")]
    TrailingData,
}

/// Where an operational failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Querying the get target's metadata
    Inspect,
    /// Opening the target file
    Open,
    /// Reading the get target
    ReadSource,
    /// Writing file contents to the output
    WriteOutput,
    /// Reading the set body from the input
    ReadBody,
    /// Writing the set body into the target
    WriteTarget,
    /// Writing the set acknowledgment
    Acknowledge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::Inspect => "inspecting target",
            Stage::Open => "opening target",
            Stage::ReadSource => "reading target",
            Stage::WriteOutput => "writing output",
            Stage::ReadBody => "reading body",
            Stage::WriteTarget => "writing target",
            Stage::Acknowledge => "acknowledging",
        };
        f.write_str(stage)
    }
}
