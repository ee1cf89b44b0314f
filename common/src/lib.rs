//! Shared models for `srvsweep`.
//!
//! Everything needed to turn user-supplied range descriptors into addresses
//! lives here, together with the configuration, error and event types that
//! the scanner in `srvsweep-core` and the terminal front end both speak.

pub mod config;
pub mod error;
pub mod event;
pub mod network;
