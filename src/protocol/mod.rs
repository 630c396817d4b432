//! Protocol Module
//!
//! Defines the line-oriented request protocol read from the input stream.
//!
//! ## Request Format
//! ```text
//! ┌───────────┬─────────────────┬──────────────┬──────────────────┐
//! │ "get" LF  │ location LF     │              │ whitespace only  │
//! ├───────────┼─────────────────┼──────────────┼──────────────────┤
//! │ "set" LF  │ location LF     │ length LF    │ body (length B)  │
//! └───────────┴─────────────────┴──────────────┴──────────────────┘
//! ```
//!
//! ### Commands
//! - get: stream an existing regular file to the output
//! - set: store `length` body bytes into a file, creating or truncating it
//!
//! ### Responses
//! - get success: the file's bytes, nothing else
//! - set success: `OK\n`
//! - failure: `Invalid Command\n` or `Operation Failed\n` on the error stream,
//!   exit status 1

mod command;
mod response;
mod codec;
mod line;

pub use command::{CommandType, Header, Request};
pub use response::{Status, ACK, INVALID_MESSAGE, OPERATION_FAILED_MESSAGE};
pub use codec::{
    parse_content_length, parse_location, read_command, read_content_length, read_location,
    read_request,
};
pub use line::{read_line, Line, LineError};
