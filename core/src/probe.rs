//! The per-address HTTPS probe and the classification of its result.
//!
//! How the request is made is hidden behind [`HttpProber`], so the scanner
//! can run against the real network through [`https::ReqwestProber`] or
//! against a scripted prober in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use srvsweep_common::config::DEFAULT_HTTPS_PORT;
use srvsweep_common::event::{ScanEvent, ScanReporter};
use tokio::time::timeout;
use tracing::error;

use crate::sink::OutputSink;

pub mod https;

/// What came back from a GET that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    /// The `Server` header, if the response carried one.
    pub server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Transport(String),
}

/// Performs one GET request.
#[async_trait]
pub trait HttpProber: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    ReachableWithServer { server: String },
    ReachableNoServer,
    Non200 { status: u16 },
    RequestFailed { error: String },
}

impl ProbeOutcome {
    /// Whether the address belongs in the output file.
    pub fn qualifies(&self) -> bool {
        matches!(self, ProbeOutcome::ReachableWithServer { .. })
    }

    pub fn to_event(&self, address: &str) -> ScanEvent {
        let address = address.to_string();
        match self {
            ProbeOutcome::ReachableWithServer { server } => ScanEvent::ReachableWithServer {
                address,
                server: server.clone(),
            },
            ProbeOutcome::ReachableNoServer => ScanEvent::ReachableNoServer { address },
            ProbeOutcome::Non200 { status } => ScanEvent::Non200 {
                address,
                status: *status,
            },
            ProbeOutcome::RequestFailed { error } => ScanEvent::RequestFailed {
                address,
                error: error.clone(),
            },
        }
    }
}

/// Maps a request result onto an outcome.
///
/// Failures come first, then non-200 statuses. A 200 only qualifies when
/// the `Server` header holds something other than whitespace.
pub fn classify(result: Result<HttpReply, ProbeError>) -> ProbeOutcome {
    let reply = match result {
        Ok(reply) => reply,
        Err(e) => return ProbeOutcome::RequestFailed { error: e.to_string() },
    };

    if reply.status != 200 {
        return ProbeOutcome::Non200 {
            status: reply.status,
        };
    }

    match reply.server.map(|s| s.trim().to_string()) {
        Some(server) if !server.is_empty() => ProbeOutcome::ReachableWithServer { server },
        _ => ProbeOutcome::ReachableNoServer,
    }
}

pub fn probe_url(address: &str, port: u16) -> String {
    if port == DEFAULT_HTTPS_PORT {
        format!("https://{address}/")
    } else {
        format!("https://{address}:{port}/")
    }
}

/// Everything a probe task needs, cheap to clone into each task.
#[derive(Clone)]
pub struct ProbeWorker {
    prober: Arc<dyn HttpProber>,
    sink: OutputSink,
    reporter: Arc<dyn ScanReporter>,
    timeout: Duration,
    port: u16,
}

impl ProbeWorker {
    pub fn new(
        prober: Arc<dyn HttpProber>,
        sink: OutputSink,
        reporter: Arc<dyn ScanReporter>,
        timeout: Duration,
        port: u16,
    ) -> Self {
        Self {
            prober,
            sink,
            reporter,
            timeout,
            port,
        }
    }

    /// Probes `address` once, records it if it qualifies and reports the
    /// outcome.
    ///
    /// The timeout covers the whole request. Nothing is retried, and a
    /// failing output file is logged rather than propagated.
    pub async fn probe(&self, address: &str) -> ProbeOutcome {
        let url = probe_url(address, self.port);

        let result = match timeout(self.timeout, self.prober.get(&url)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ProbeError::Timeout(self.timeout)),
        };
        let outcome = classify(result);

        if outcome.qualifies() {
            if let Err(e) = self.sink.append(address).await {
                error!("Failed to record {address}: {e}");
            }
        }

        self.reporter.report(outcome.to_event(address));
        outcome
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
