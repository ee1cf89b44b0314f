use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use srvsweep_common::event::{ScanEvent, ScanReporter};
use srvsweep_core::probe::{HttpProber, HttpReply, ProbeError};
use tempfile::NamedTempFile;

/// Answers every request the same way and tracks how many are in flight.
pub struct CountingProber {
    reply: HttpReply,
    delay: Duration,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingProber {
    pub fn new(status: u16, server: Option<&str>, delay: Duration) -> Self {
        Self {
            reply: HttpReply {
                status,
                server: server.map(String::from),
            },
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpProber for CountingProber {
    async fn get(&self, _url: &str) -> Result<HttpReply, ProbeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

#[derive(Default)]
pub struct Recorder(pub Mutex<Vec<ScanEvent>>);

impl ScanReporter for Recorder {
    fn report(&self, event: ScanEvent) {
        self.0.lock().unwrap().push(event);
    }
}

impl Recorder {
    pub fn count(&self, kind: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.0.lock().unwrap().clone()
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

/// A file in the working directory, so its bare name is a file descriptor.
///
/// Removed on drop, unwinding included. Only an aborted test run leaves a
/// `hosts*.txt` behind, which the root `.gitignore` covers.
pub fn local_file(contents: impl AsRef<[u8]>) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("hosts")
        .suffix(".txt")
        .tempfile_in(".")
        .unwrap();
    file.write_all(contents.as_ref()).unwrap();
    file.flush().unwrap();
    file
}

pub fn bare_name(file: &NamedTempFile) -> String {
    file.path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}
