//! Error types shared by the descriptor parser and the scanner.

use std::io;
use std::path::PathBuf;

/// Why a single range descriptor could not be expanded.
///
/// These never abort a scan. The scanner records the descriptor, reports it
/// and moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid CIDR '{descriptor}': {reason}")]
    InvalidCidr { descriptor: String, reason: String },

    #[error("invalid address in range '{descriptor}': {reason}")]
    InvalidAddress { descriptor: String, reason: String },

    #[error("invalid file: {path}")]
    FileNotFound { path: String },

    #[error("cannot read '{path}': {reason}")]
    Unreadable { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Failures that stop a scan before or while it acquires its resources.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open output file {}: {source}", .path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create a pool of {requested} workers (allowed: 1..={max})")]
    WorkerPool { requested: usize, max: usize },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
}
