//! A fixed-size pool of probe slots.
//!
//! Each submitted task runs on the tokio runtime but has to hold one of the
//! pool's permits while it works, so at most `size` tasks make progress at
//! once. [`WorkerPool::run_batch`] returns only when every task of the batch
//! has finished, which is what turns a chunk into a barrier.

use std::future::Future;
use std::sync::Arc;

use srvsweep_common::error::ScanError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub const MAX_WORKERS: usize = Semaphore::MAX_PERMITS;

    pub fn new(size: usize) -> Result<Self, ScanError> {
        if size == 0 || size > Self::MAX_WORKERS {
            return Err(ScanError::WorkerPool {
                requested: size,
                max: Self::MAX_WORKERS,
            });
        }

        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs `task` for every item and waits for all of them.
    ///
    /// Returns how many tasks ran to completion. A panicking task is logged
    /// and does not stop the others. If this future is dropped early the
    /// tasks still queued or running are aborted.
    pub async fn run_batch<T, F, Fut>(&self, items: impl IntoIterator<Item = T>, task: F) -> usize
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        for item in items {
            let permits = Arc::clone(&self.permits);
            let work = task(item);
            tasks.spawn(async move {
                // Only fails once the pool is closed, and then nothing should run.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return false;
                };
                work.await;
                true
            });
        }

        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => completed += 1,
                Ok(false) => {}
                Err(e) => error!("Probe task failed: {e}"),
            }
        }
        completed
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.permits.close();
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
