//! Engine Module
//!
//! Carries out a parsed request against the filesystem.
//!
//! ## Responsibilities
//! - Validate get targets before touching the output
//! - Reject get requests followed by anything but whitespace
//! - Stream get targets to the output
//! - Copy exactly the declared number of set body bytes into the target

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::config::Config;
use crate::error::{InvalidRequest, MemoryError, Result, Stage};
use crate::protocol::{Request, ACK};
use crate::transfer::{is_space, read_chunk, write_fully};

/// Executes requests
///
/// ## Resource Model
///
/// Strictly sequential and blocking. The engine holds no state between
/// requests apart from its configuration; any file handle it opens lives only
/// for the duration of one handler call and is released on every exit path.
/// Set does not write atomically, so a failure mid-copy can leave a partially
/// written target.
pub struct Engine {
    /// Engine configuration
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute a request
    ///
    /// `input` is the request stream, positioned just past the headers.
    pub fn execute<R, W>(&self, request: Request, input: &mut R, output: &mut W) -> Result<()>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        match request {
            Request::Get { location } => {
                self.get(&location, input, output)?;
            }
            Request::Set {
                location,
                content_length,
            } => {
                self.set(&location, content_length, input, output)?;
            }
        }
        Ok(())
    }

    /// Stream an existing regular file to `output`
    ///
    /// Steps:
    /// 1. Check the target exists and is a regular file
    /// 2. Drain `input`, failing on any non-whitespace byte
    /// 3. Copy the file to `output` chunk by chunk
    ///
    /// Returns the number of bytes streamed.
    pub fn get<R, W>(&self, location: &Path, input: &mut R, output: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        // Step 1: Validate the target
        let metadata = fs::metadata(location).map_err(|e| not_found_or(location, Stage::Inspect, e))?;
        if !metadata.is_file() {
            return Err(InvalidRequest::NotRegularFile(location.to_path_buf()).into());
        }

        // Step 2: Nothing but whitespace may follow a get request
        self.drain_trailing(input)?;

        // Step 3: Stream the file
        let mut file = File::open(location).map_err(|e| not_found_or(location, Stage::Open, e))?;
        let mut chunk = vec![0u8; self.config.io_chunk_size];
        let mut streamed = 0u64;

        loop {
            let n = read_chunk(&mut file, &mut chunk)
                .map_err(|e| MemoryError::operation(Stage::ReadSource, e))?;
            if n == 0 {
                break;
            }

            write_fully(output, &chunk[..n])
                .map_err(|e| MemoryError::operation(Stage::WriteOutput, e))?;
            streamed += n as u64;
            tracing::trace!("streamed {} bytes of {}", streamed, location.display());
        }

        output
            .flush()
            .map_err(|e| MemoryError::operation(Stage::WriteOutput, e))?;

        tracing::debug!("get {}: {} bytes", location.display(), streamed);
        Ok(streamed)
    }

    /// Store up to `content_length` bytes of `input` into `location`
    ///
    /// Steps:
    /// 1. Create or truncate the target
    /// 2. Copy body bytes until `content_length` are stored or `input` ends
    /// 3. Close the target and acknowledge on `output`
    ///
    /// A body shorter than `content_length` is stored as-is. Bytes past
    /// `content_length` are left unread. Returns the number of bytes stored.
    pub fn set<R, W>(
        &self,
        location: &Path,
        content_length: u64,
        input: &mut R,
        output: &mut W,
    ) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        // Step 1: Open the target
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(self.config.file_mode)
            .open(location)
            .map_err(|e| MemoryError::operation(Stage::Open, e))?;

        // Step 2: Copy the body
        let stored = self.copy_body(&mut file, content_length, input)?;
        if stored < content_length {
            tracing::debug!(
                "set {}: body ended after {} of {} bytes",
                location.display(),
                stored,
                content_length
            );
        }

        // Step 3: Close, then acknowledge
        drop(file);
        write_fully(output, ACK)
            .and_then(|()| output.flush())
            .map_err(|e| MemoryError::operation(Stage::Acknowledge, e))?;

        tracing::debug!("set {}: {} bytes", location.display(), stored);
        Ok(stored)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy at most `limit` bytes from `input` into `file`
    fn copy_body<R: Read + ?Sized>(&self, file: &mut File, limit: u64, input: &mut R) -> Result<u64> {
        let mut chunk = vec![0u8; self.config.io_chunk_size];
        let mut stored = 0u64;

        while stored < limit {
            // Never request bytes past the declared length
            let remaining = usize::try_from(limit - stored).unwrap_or(usize::MAX);
            let want = chunk.len().min(remaining);

            let n = read_chunk(input, &mut chunk[..want])
                .map_err(|e| MemoryError::operation(Stage::ReadBody, e))?;
            if n == 0 {
                break;
            }

            write_fully(file, &chunk[..n]).map_err(|e| MemoryError::operation(Stage::WriteTarget, e))?;
            stored += n as u64;
            tracing::trace!("stored {} of {} body bytes", stored, limit);
        }

        Ok(stored)
    }

    /// Consume the rest of `input`, failing on the first non-whitespace byte
    ///
    /// A read failure ends the drain quietly; only unexpected data is an error.
    fn drain_trailing<R: Read + ?Sized>(&self, input: &mut R) -> Result<()> {
        let mut chunk = vec![0u8; self.config.drain_chunk_size];
        let mut drained = 0u64;

        loop {
            let n = match read_chunk(input, &mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    tracing::debug!("stopped draining trailing input: {}", e);
                    break;
                }
            };

            if !chunk[..n].iter().all(|&b| is_space(b)) {
                return Err(InvalidRequest::TrailingData.into());
            }
            drained += n as u64;
        }

        tracing::trace!("drained {} bytes of trailing whitespace", drained);
        Ok(())
    }
}

/// Not-found is the caller's fault; anything else is an operational failure
fn not_found_or(location: &Path, stage: Stage, e: io::Error) -> MemoryError {
    if e.kind() == io::ErrorKind::NotFound {
        InvalidRequest::NotFound(location.to_path_buf()).into()
    } else {
        MemoryError::operation(stage, e)
    }
}
