//! The scan orchestrator.
//!
//! A [`Scanner`] owns one run: it resolves `<file` indirection, expands each
//! descriptor in turn and pushes the addresses through a [`WorkerPool`] one
//! chunk at a time. A chunk is a barrier. Its probes all finish before the next
//! chunk is submitted, which keeps at most one chunk of tasks alive.
//!
//! Bad descriptors and failed probes never stop the run. Only a bad config, an
//! output file that cannot be opened or a pool that cannot be built are fatal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use srvsweep_common::config::ScanConfig;
use srvsweep_common::error::{ParseError, ScanError};
use srvsweep_common::event::{ScanEvent, ScanReporter};
use srvsweep_common::network::chunk;
use srvsweep_common::network::descriptor::{self, Expansion};
use srvsweep_common::network::ingest::{self, Resolution};
use tracing::debug;

use crate::pool::WorkerPool;
use crate::probe::https::ReqwestProber;
use crate::probe::{HttpProber, ProbeWorker};
use crate::sink::OutputSink;

/// What a finished run hands back.
#[derive(Debug)]
pub struct ScanReport {
    pub elapsed: Duration,
    /// Skipped descriptors in the order they were found.
    pub invalid: Vec<(String, ParseError)>,
    /// Probe tasks that ran to completion.
    pub probed: usize,
    /// Addresses appended to the output file.
    pub recorded: usize,
}

impl ScanReport {
    pub fn invalid_descriptors(&self) -> Vec<&str> {
        self.invalid.iter().map(|(d, _)| d.as_str()).collect()
    }
}

pub struct Scanner {
    config: ScanConfig,
    prober: Arc<dyn HttpProber>,
    reporter: Arc<dyn ScanReporter>,
}

impl Scanner {
    pub fn new(
        config: ScanConfig,
        prober: Arc<dyn HttpProber>,
        reporter: Arc<dyn ScanReporter>,
    ) -> Self {
        Self {
            config,
            prober,
            reporter,
        }
    }

    /// A scanner that probes the real network with [`ReqwestProber`].
    pub fn with_https(
        config: ScanConfig,
        reporter: Arc<dyn ScanReporter>,
    ) -> Result<Self, ScanError> {
        let prober = ReqwestProber::new(config.timeout, config.accept_invalid_certs)
            .map_err(|e| ScanError::HttpClient(e.to_string()))?;
        Ok(Self::new(config, Arc::new(prober), reporter))
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Runs the scan to completion.
    pub async fn run(&self) -> Result<ScanReport, ScanError> {
        self.config.validate()?;

        let sink = OutputSink::open(&self.config.output_path)
            .await
            .map_err(|source| ScanError::OutputSink {
                path: self.config.output_path.clone(),
                source,
            })?;
        let pool = WorkerPool::new(self.config.max_workers)?;
        let worker = ProbeWorker::new(
            Arc::clone(&self.prober),
            sink.clone(),
            Arc::clone(&self.reporter),
            self.config.timeout,
            self.config.port,
        );

        let Resolution {
            descriptors,
            invalid: unresolved,
        } = ingest::resolve_indirection(&self.config.descriptors);

        let start_time = Instant::now();
        let mut invalid = Vec::new();
        let mut probed = 0;

        for (descriptor, error) in unresolved {
            self.reject(&mut invalid, descriptor, error);
        }

        for descriptor in descriptors {
            match descriptor::expand(&descriptor) {
                Ok(expansion) => {
                    probed += self.scan_range(&pool, &worker, &descriptor, expansion).await?;
                }
                Err(error) => self.reject(&mut invalid, descriptor, error),
            }
        }

        let elapsed = start_time.elapsed();
        self.reporter.report(ScanEvent::RunComplete {
            elapsed,
            invalid: invalid.len(),
        });

        Ok(ScanReport {
            elapsed,
            invalid,
            probed,
            recorded: sink.written(),
        })
    }

    async fn scan_range(
        &self,
        pool: &WorkerPool,
        worker: &ProbeWorker,
        descriptor: &str,
        expansion: Expansion,
    ) -> Result<usize, ScanError> {
        let Expansion { kind, addresses } = expansion;
        let chunk_size = self.config.chunk_size;

        self.reporter.report(ScanEvent::RangeStarted {
            descriptor: descriptor.to_string(),
            kind,
            total: addresses.len(),
        });

        let chunk_total = chunk::chunk_count(addresses.len(), chunk_size);
        let mut probed = 0;

        for (idx, batch) in chunk::chunk(&addresses, chunk_size)?.enumerate() {
            debug!(
                "{descriptor}: chunk {}/{chunk_total} ({} addresses, {} workers)",
                idx + 1,
                batch.len(),
                pool.size()
            );

            probed += pool
                .run_batch(batch.iter().cloned(), |address: String| {
                    let worker = worker.clone();
                    async move {
                        worker.probe(&address).await;
                    }
                })
                .await;
        }

        self.reporter.report(ScanEvent::RangeFinished {
            descriptor: descriptor.to_string(),
            kind,
        });
        Ok(probed)
    }

    fn reject(
        &self,
        invalid: &mut Vec<(String, ParseError)>,
        descriptor: String,
        error: ParseError,
    ) {
        self.reporter.report(ScanEvent::RangeInvalid {
            descriptor: descriptor.clone(),
            error: error.clone(),
        });
        invalid.push((descriptor, error));
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
