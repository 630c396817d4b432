//! Session
//!
//! Answers exactly one request from an input stream.

use std::io::{Read, Write};

use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::{read_request, Status};
use crate::transfer::write_fully;

/// One protocol invocation over three streams
///
/// `run` consumes the session; answering another request means building a
/// new one.
pub struct Session<R, W, E> {
    /// Request stream (headers, then a set body or trailing whitespace)
    input: R,

    /// Response stream (get contents or the set acknowledgment)
    output: W,

    /// Error stream for the single failure message
    errors: E,

    /// Executes the parsed request
    engine: Engine,
}

impl<R, W, E> Session<R, W, E>
where
    R: Read,
    W: Write,
    E: Write,
{
    /// Create a new session
    pub fn new(input: R, output: W, errors: E, config: Config) -> Self {
        Self {
            input,
            output,
            errors,
            engine: Engine::new(config),
        }
    }

    /// Read, execute and answer the request
    ///
    /// On failure exactly one fixed message goes to the error stream. The
    /// returned status carries the exit code.
    pub fn run(mut self) -> Status {
        match self.serve() {
            Ok(()) => Status::Ok,
            Err(e) => {
                tracing::warn!("request failed: {}", e);
                let status = e.status();
                self.report(status);
                status
            }
        }
    }

    fn serve(&mut self) -> Result<()> {
        let request = read_request(&mut self.input, self.engine.config())?;

        tracing::debug!(
            "received {} for {}",
            request.command_type(),
            request.location().display()
        );

        self.engine.execute(request, &mut self.input, &mut self.output)
    }

    /// Write the status message; the exit status reports the failure even if this fails
    fn report(&mut self, status: Status) {
        let Some(message) = status.message() else {
            return;
        };

        if let Err(e) = write_fully(&mut self.errors, message).and_then(|()| self.errors.flush()) {
            tracing::debug!("failed to report {:?}: {}", status, e);
        }
    }
}
