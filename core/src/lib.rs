//! The scanning engine of `srvsweep`.
//!
//! [`scanner::Scanner`] walks the range descriptors of a [`ScanConfig`],
//! expands each one, and probes its addresses over HTTPS through a bounded
//! [`pool::WorkerPool`], one chunk at a time.
//!
//! [`ScanConfig`]: srvsweep_common::config::ScanConfig

pub mod pool;
pub mod probe;
pub mod scanner;
pub mod sink;
