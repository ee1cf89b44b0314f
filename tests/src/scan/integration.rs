use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use srvsweep_common::config::ScanConfig;
use srvsweep_common::error::ParseError;
use srvsweep_common::event::ScanEvent;
use srvsweep_core::scanner::Scanner;
use tempfile::TempDir;

use super::util::{CountingProber, Recorder, bare_name, local_file, read_lines};

fn config(dir: &TempDir, descriptors: &[&str], workers: usize) -> ScanConfig {
    ScanConfig::new(
        descriptors.iter().map(|d| d.to_string()).collect(),
        workers,
        Duration::from_secs(5),
        dir.path().join("alive.txt"),
    )
}

/// A thousand concurrent probes produce a thousand intact lines and never
/// exceed the worker limit.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn thousand_hosts_are_recorded_once_each() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.1-10.0.3.232"], 10);
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::from_millis(1)));
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::new(cfg.clone(), prober.clone(), recorder.clone())
        .run()
        .await
        .expect("scan failed");

    let lines = read_lines(&cfg.output_path);
    assert_eq!(lines.len(), 1000);
    assert_eq!(lines.iter().collect::<HashSet<_>>().len(), 1000);
    for line in &lines {
        assert!(line.parse::<Ipv4Addr>().is_ok(), "torn line: {line:?}");
    }

    assert_eq!(report.probed, 1000);
    assert_eq!(report.recorded, 1000);
    assert_eq!(prober.calls(), 1000);
    assert!(prober.peak() <= 10, "peak concurrency was {}", prober.peak());
    assert_eq!(recorder.count("reachable-with-server"), 1000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn chunk_boundary_caps_concurrency_below_worker_count() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.1-10.0.0.40"], 10).with_chunk_size(5);
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::from_millis(5)));

    let report = Scanner::new(cfg, prober.clone(), Arc::new(Recorder::default()))
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.probed, 40);
    assert!(prober.peak() <= 5, "peak concurrency was {}", prober.peak());
}

#[tokio::test]
async fn non_200_answers_are_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.0/30"], 4);
    let prober = Arc::new(CountingProber::new(503, Some("nginx"), Duration::ZERO));
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::new(cfg.clone(), prober, recorder.clone())
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.recorded, 0);
    assert!(read_lines(&cfg.output_path).is_empty());
    assert!(recorder
        .events()
        .iter()
        .any(|e| matches!(e, ScanEvent::Non200 { status: 503, .. })));
    assert_eq!(recorder.count("non-200"), 2);
}

#[tokio::test]
async fn missing_server_header_is_reported_but_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.7-10.0.0.7"], 1);
    let prober = Arc::new(CountingProber::new(200, Some("   "), Duration::ZERO));
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::new(cfg, prober, recorder.clone())
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.recorded, 0);
    assert_eq!(recorder.count("reachable-no-server"), 1);
}

/// A listener that accepts the connection and never answers the handshake.
#[tokio::test]
async fn silent_server_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let dir = tempfile::tempdir().unwrap();
    let cfg = ScanConfig::new(
        vec!["127.0.0.1-127.0.0.1".to_string()],
        1,
        Duration::from_secs(1),
        dir.path().join("alive.txt"),
    )
    .with_port(port);
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::with_https(cfg.clone(), recorder.clone())
        .unwrap()
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.recorded, 0);
    assert!(read_lines(&cfg.output_path).is_empty());

    let failure = recorder
        .events()
        .into_iter()
        .find_map(|e| match e {
            ScanEvent::RequestFailed { address, error } => Some((address, error)),
            _ => None,
        })
        .expect("no failure reported");
    assert_eq!(failure.0, "127.0.0.1");
    assert!(failure.1.contains("timed out"), "unexpected error: {}", failure.1);

    drop(listener);
}

#[tokio::test]
async fn missing_file_is_skipped_and_the_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["nofile.txt", "10.0.0.1-10.0.0.2"], 2);
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::ZERO));

    let report = Scanner::new(cfg.clone(), prober, Arc::new(Recorder::default()))
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.invalid_descriptors(), vec!["nofile.txt"]);
    assert!(matches!(
        report.invalid[0].1,
        ParseError::FileNotFound { .. }
    ));
    let mut lines = read_lines(&cfg.output_path);
    lines.sort();
    assert_eq!(lines, vec!["10.0.0.1", "10.0.0.2"]);
}

#[tokio::test]
async fn indirection_file_is_merged_and_deduplicated() {
    let inputs = local_file("10.0.0.0/30\n\n10.0.1.1-10.0.1.2\n");
    let indirection = format!("<{}", bare_name(&inputs));

    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.0/30", &indirection], 2);
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::ZERO));
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::new(cfg.clone(), prober, recorder.clone())
        .run()
        .await
        .expect("scan failed");

    assert!(report.invalid.is_empty());
    assert_eq!(recorder.count("range-started"), 2);

    let mut lines = read_lines(&cfg.output_path);
    lines.sort();
    assert_eq!(lines, vec!["10.0.0.1", "10.0.0.2", "10.0.1.1", "10.0.1.2"]);
}

#[tokio::test]
async fn address_file_entries_are_probed() {
    let hosts = local_file("192.168.7.10\n192.168.7.11\n");
    let name = bare_name(&hosts);

    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &[&name], 2);
    let prober = Arc::new(CountingProber::new(200, Some("Apache"), Duration::ZERO));
    let recorder = Arc::new(Recorder::default());

    Scanner::new(cfg.clone(), prober, recorder.clone())
        .run()
        .await
        .expect("scan failed");

    let mut lines = read_lines(&cfg.output_path);
    lines.sort();
    assert_eq!(lines, vec!["192.168.7.10", "192.168.7.11"]);
    assert!(recorder.events().iter().any(|e| matches!(
        e,
        ScanEvent::RangeStarted { total: 2, .. }
    )));
}

#[tokio::test]
async fn results_are_appended_to_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["10.0.0.5-10.0.0.5"], 1);
    std::fs::write(&cfg.output_path, "10.9.9.9\n").unwrap();
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::ZERO));

    Scanner::new(cfg.clone(), prober, Arc::new(Recorder::default()))
        .run()
        .await
        .expect("scan failed");

    assert_eq!(read_lines(&cfg.output_path), vec!["10.9.9.9", "10.0.0.5"]);
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &["127.0.0.1-127.0.0.1"], 1).with_port(port);
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::with_https(cfg, recorder.clone())
        .unwrap()
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.recorded, 0);
    let error = recorder
        .events()
        .into_iter()
        .find_map(|e| match e {
            ScanEvent::RequestFailed { error, .. } => Some(error),
            _ => None,
        })
        .expect("no failure reported");
    assert!(!error.contains("timed out"), "unexpected timeout: {error}");
}

#[tokio::test]
async fn unreadable_file_is_skipped_and_later_ranges_still_run() {
    let garbled = local_file(b"10.0.0.1\n\xff\xfe\n");
    let name = bare_name(&garbled);

    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir, &[&name, "10.0.0.9-10.0.0.9"], 2);
    let prober = Arc::new(CountingProber::new(200, Some("X"), Duration::ZERO));
    let recorder = Arc::new(Recorder::default());

    let report = Scanner::new(cfg.clone(), prober.clone(), recorder.clone())
        .run()
        .await
        .expect("scan failed");

    assert_eq!(report.invalid_descriptors(), vec![name.as_str()]);
    assert!(matches!(
        report.invalid[0].1,
        ParseError::Unreadable { .. }
    ));
    assert_eq!(recorder.count("range-invalid"), 1);
    assert_eq!(prober.calls(), 1);
    assert_eq!(read_lines(&cfg.output_path), vec!["10.0.0.9"]);
}
