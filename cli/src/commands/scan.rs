use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use srvsweep_common::config::{Config, ScanConfig};
use srvsweep_common::network::descriptor;
use srvsweep_core::scanner::{ScanReport, Scanner};

use crate::commands::{ScanArgs, prompt};
use crate::mprint;
use crate::terminal::reporter::ConsoleReporter;
use crate::terminal::{colors, print};

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let mut descriptors = match args.targets.as_deref() {
        Some(targets) => descriptor::split_list(targets),
        None => prompt::descriptors()?,
    };
    let workers = match args.workers {
        Some(n) => n,
        None => prompt::workers()?,
    };
    let timeout = match args.timeout {
        Some(secs) => secs,
        None => prompt::timeout()?,
    };
    let output = match args.output {
        Some(path) => path,
        None => prompt::output()?,
    };

    let reporter = Arc::new(ConsoleReporter::new(cfg.quiet));

    loop {
        let config = ScanConfig::new(
            descriptors,
            workers,
            Duration::from_secs(timeout),
            output.clone(),
        )
        .with_chunk_size(args.chunk_size)
        .with_port(args.port)
        .with_accept_invalid_certs(args.insecure);

        print::header("scanning", cfg.quiet);
        let scanner = Scanner::with_https(config, reporter.clone())?;
        let report = scanner
            .run()
            .await
            .with_context(|| {
                format!(
                    "scan writing to {} failed",
                    scanner.config().output_path.display()
                )
            })?;

        summary(&report, cfg.quiet);

        if !args.retry || report.invalid.is_empty() {
            return Ok(());
        }
        if !prompt::confirm("Do you want to retry with valid input ranges? (y/n):")? {
            return Ok(());
        }
        descriptors = prompt::descriptors()?;
    }
}

fn summary(report: &ScanReport, q_level: u8) {
    let secs = report.elapsed.as_secs_f64();

    mprint!();
    print::fat_separator();
    print::centerln(&"COMPLETED".color(colors::ALIVE).bold().to_string());
    print::fat_separator();
    print::print_status(format!(
        "Total time taken: {:.2} seconds ({:.2} minutes)",
        secs,
        secs / 60.0
    ));
    print::print_status(format!(
        "Probed {} addresses, {} recorded",
        report.probed, report.recorded
    ));

    if report.invalid.is_empty() {
        return;
    }

    mprint!();
    print::centerln(&"ERRORS IN INPUTS".color(colors::FAILURE).bold().to_string());
    for (descriptor, error) in &report.invalid {
        if q_level > 1 {
            print::print_status(descriptor);
        } else {
            print::print_status(format!("{descriptor}: {error}"));
        }
    }
}
