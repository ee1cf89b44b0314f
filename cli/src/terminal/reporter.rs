use std::sync::Mutex;

use colored::*;
use indicatif::ProgressStyle;
use srvsweep_common::event::{ScanEvent, ScanReporter};
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;
use crate::terminal::print;

const BAR_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:32.cyan/blue}] {pos}/{len} ({eta})";

/// Draws scan events as colored lines plus one progress bar per range.
///
/// `-q` drops failures and non-200 answers, `-qq` drops every per-event line.
pub struct ConsoleReporter {
    q_level: u8,
    progress: Mutex<Option<Span>>,
}

impl ConsoleReporter {
    pub fn new(q_level: u8) -> Self {
        Self {
            q_level,
            progress: Mutex::new(None),
        }
    }

    fn line(&self, min_quiet: u8, msg: impl AsRef<str>) {
        if self.q_level < min_quiet {
            print::print(msg.as_ref());
        }
    }

    fn tick(&self) {
        let guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(span) = guard.as_ref() {
            span.pb_inc(1);
        }
    }

    fn start_range(&self, label: String, total: usize) {
        let span = info_span!("range", indicatif.pb_show = true);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            span.pb_set_style(&style);
        }
        span.pb_set_length(total as u64);
        span.pb_set_message(&label);
        span.pb_start();

        let mut guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(span);
    }

    fn finish_range(&self) {
        let mut guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        guard.take();
    }
}

impl ScanReporter for ConsoleReporter {
    fn report(&self, event: ScanEvent) {
        if event.address().is_some() {
            self.tick();
        }

        match event {
            ScanEvent::ReachableWithServer { address, server } => {
                self.line(2, format!("{} | {}", address, server).color(colors::ALIVE).to_string());
            }
            ScanEvent::ReachableNoServer { address } => {
                self.line(
                    2,
                    format!("{address} | Alive, but server header not found")
                        .color(colors::PARTIAL)
                        .to_string(),
                );
            }
            ScanEvent::Non200 { address, status } => {
                self.line(
                    1,
                    format!("{address} | Status {status}")
                        .color(colors::PARTIAL)
                        .to_string(),
                );
            }
            ScanEvent::RequestFailed { address, error } => {
                self.line(
                    1,
                    format!("{address} | Error: {error}")
                        .color(colors::FAILURE)
                        .to_string(),
                );
            }
            ScanEvent::RangeStarted {
                descriptor,
                kind,
                total,
            } => {
                self.line(
                    2,
                    format!("Processing {kind} range: {descriptor} ({total} addresses)")
                        .color(colors::ACCENT)
                        .to_string(),
                );
                self.start_range(format!("{kind} {descriptor}"), total);
            }
            ScanEvent::RangeFinished { descriptor, kind } => {
                self.finish_range();
                self.line(
                    2,
                    format!("Finished processing {kind} range: {descriptor}")
                        .color(colors::RANGE_DONE)
                        .to_string(),
                );
            }
            ScanEvent::RangeInvalid { descriptor, error } => {
                self.line(
                    2,
                    format!("Invalid input {descriptor}: {error}")
                        .color(colors::FAILURE)
                        .to_string(),
                );
            }
            // The command prints its own summary.
            ScanEvent::RunComplete { .. } => self.finish_range(),
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
