use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Number of addresses submitted to the pool before waiting for them all.
pub const DEFAULT_CHUNK_SIZE: usize = 12_800;
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Presentation settings for the terminal front end.
pub struct Config {
    /// 0 prints everything, 1 drops headers and per-address noise,
    /// 2 only prints the final summary.
    pub quiet: u8,
    pub no_banner: bool,
}

/// Everything a single scan run needs, fixed before the run starts.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Range descriptors in the order they were supplied.
    pub descriptors: Vec<String>,
    pub max_workers: usize,
    /// Applied to the whole request of every probe.
    pub timeout: Duration,
    /// Opened in append mode; created when missing.
    pub output_path: PathBuf,
    pub chunk_size: usize,
    pub port: u16,
    /// Lets self-signed and IP-mismatched certificates through.
    pub accept_invalid_certs: bool,
}

impl ScanConfig {
    pub fn new(
        descriptors: Vec<String>,
        max_workers: usize,
        timeout: Duration,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            descriptors,
            max_workers,
            timeout,
            output_path: output_path.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            port: DEFAULT_HTTPS_PORT,
            accept_invalid_certs: false,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Checks the values the scanner cannot work around.
    ///
    /// The worker count is checked when the pool is built, since its upper
    /// bound comes from the pool implementation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
