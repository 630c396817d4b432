//! Command definitions
//!
//! Represents the single request a session answers.

use std::fmt;
use std::path::{Path, PathBuf};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Set,
}

impl CommandType {
    /// Match a trimmed command line, case-sensitively
    pub fn parse(name: &[u8]) -> Option<Self> {
        match name {
            b"get" => Some(CommandType::Get),
            b"set" => Some(CommandType::Set),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Get => "get",
            CommandType::Set => "set",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Stream the contents of an existing regular file
    Get { location: PathBuf },

    /// Store up to `content_length` body bytes into a file
    Set {
        location: PathBuf,
        content_length: u64,
    },
}

impl Request {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Request::Get { .. } => CommandType::Get,
            Request::Set { .. } => CommandType::Set,
        }
    }

    /// The target file
    pub fn location(&self) -> &Path {
        match self {
            Request::Get { location } | Request::Set { location, .. } => location,
        }
    }
}

/// The header lines a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Command,
    Location,
    ContentLength,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Header::Command => "command",
            Header::Location => "location",
            Header::ContentLength => "content length",
        };
        f.write_str(name)
    }
}
