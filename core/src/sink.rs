use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// The append-only output file, shared by every probe task.
///
/// All writes go through one lock and each line is written whole, so
/// concurrent appends never interleave.
#[derive(Clone)]
pub struct OutputSink {
    file: Arc<Mutex<File>>,
    written: Arc<AtomicUsize>,
}

impl OutputSink {
    /// Opens `path` for appending, creating it when missing.
    pub async fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            written: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub async fn append(&self, address: &str) -> io::Result<()> {
        let line = format!("{address}\n");

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        self.written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Lines appended through this sink (and its clones) so far.
    pub fn written(&self) -> usize {
        self.written.load(Ordering::Relaxed)
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
