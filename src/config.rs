//! Configuration for memory
//!
//! Buffer bounds and file creation settings with defaults matching a Linux
//! host. The protocol reads no flags or environment, so the binary always
//! runs with [`Config::default`]; the builder exists for embedding and tests.

/// Main configuration for a memory session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Header Configuration
    // -------------------------------------------------------------------------
    /// Header line buffer size, including the one reserved slot.
    /// A line stores at most `line_capacity - 1` bytes.
    pub line_capacity: usize,

    /// Locations of this length or longer are rejected (PATH_MAX)
    pub max_location_len: usize,

    // -------------------------------------------------------------------------
    // Transfer Configuration
    // -------------------------------------------------------------------------
    /// Chunk size for streaming get targets and copying set bodies (in bytes)
    pub io_chunk_size: usize,

    /// Chunk size for draining input after a get request (in bytes)
    pub drain_chunk_size: usize,

    // -------------------------------------------------------------------------
    // Target Configuration
    // -------------------------------------------------------------------------
    /// Permission bits for files created by set
    pub file_mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_capacity: 4096,
            max_location_len: 4096,
            io_chunk_size: 4096,
            drain_chunk_size: 1024,
            file_mode: 0o644,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the header line buffer size (at least 2: one byte plus the reserved slot)
    pub fn line_capacity(mut self, capacity: usize) -> Self {
        self.config.line_capacity = capacity.max(2);
        self
    }

    /// Set the location length bound
    pub fn max_location_len(mut self, len: usize) -> Self {
        self.config.max_location_len = len;
        self
    }

    /// Set the transfer chunk size (in bytes)
    pub fn io_chunk_size(mut self, size: usize) -> Self {
        self.config.io_chunk_size = size.max(1);
        self
    }

    /// Set the trailing input drain chunk size (in bytes)
    pub fn drain_chunk_size(mut self, size: usize) -> Self {
        self.config.drain_chunk_size = size.max(1);
        self
    }

    /// Set the permission bits for created files
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
