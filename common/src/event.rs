//! Events a scan emits while it runs.
//!
//! The scanner never prints. It hands every notable moment to a
//! [`ScanReporter`], and the front end decides how to show it.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::ParseError;
use crate::network::descriptor::RangeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// HTTP 200 with a non-empty `Server` header. The address qualifies for the
    /// output file; a failed append is logged separately.
    ReachableWithServer { address: String, server: String },
    /// HTTP 200 without a usable `Server` header.
    ReachableNoServer { address: String },
    Non200 { address: String, status: u16 },
    /// Transport, TLS or timeout failure.
    RequestFailed { address: String, error: String },
    RangeStarted {
        descriptor: String,
        kind: RangeKind,
        total: usize,
    },
    RangeFinished { descriptor: String, kind: RangeKind },
    RangeInvalid { descriptor: String, error: ParseError },
    RunComplete { elapsed: Duration, invalid: usize },
}

impl ScanEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ScanEvent::ReachableWithServer { .. } => "reachable-with-server",
            ScanEvent::ReachableNoServer { .. } => "reachable-no-server",
            ScanEvent::Non200 { .. } => "non-200",
            ScanEvent::RequestFailed { .. } => "request-failed",
            ScanEvent::RangeStarted { .. } => "range-started",
            ScanEvent::RangeFinished { .. } => "range-finished",
            ScanEvent::RangeInvalid { .. } => "range-invalid",
            ScanEvent::RunComplete { .. } => "run-complete",
        }
    }

    /// The address this event is about, for per-probe events.
    pub fn address(&self) -> Option<&str> {
        match self {
            ScanEvent::ReachableWithServer { address, .. }
            | ScanEvent::ReachableNoServer { address }
            | ScanEvent::Non200 { address, .. }
            | ScanEvent::RequestFailed { address, .. } => Some(address),
            _ => None,
        }
    }
}

/// Receives scan events. Called concurrently from every probe task.
pub trait ScanReporter: Send + Sync {
    fn report(&self, event: ScanEvent);
}

impl<F> ScanReporter for F
where
    F: Fn(ScanEvent) + Send + Sync,
{
    fn report(&self, event: ScanEvent) {
        self(event)
    }
}

/// Reports through `tracing`, for callers without a terminal front end.
pub struct TracingReporter;

impl ScanReporter for TracingReporter {
    fn report(&self, event: ScanEvent) {
        match event {
            ScanEvent::ReachableWithServer { address, server } => {
                info!(%address, %server, "alive")
            }
            ScanEvent::ReachableNoServer { address } => {
                warn!(%address, "alive, but server header not found")
            }
            ScanEvent::Non200 { address, status } => warn!(%address, status, "unexpected status"),
            ScanEvent::RequestFailed { address, error } => error!(%address, %error, "request failed"),
            ScanEvent::RangeStarted {
                descriptor,
                kind,
                total,
            } => info!("Processing {kind} range {descriptor} ({total} addresses)"),
            ScanEvent::RangeFinished { descriptor, kind } => {
                info!("Finished processing {kind} range: {descriptor}")
            }
            ScanEvent::RangeInvalid { descriptor, error } => {
                error!("Skipping {descriptor}: {error}")
            }
            ScanEvent::RunComplete { elapsed, invalid } => info!(
                "Completed in {:.2}s with {invalid} invalid input(s)",
                elapsed.as_secs_f64()
            ),
        }
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
