pub mod prompt;
pub mod scan;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use srvsweep_common::config::{DEFAULT_CHUNK_SIZE, DEFAULT_HTTPS_PORT};

#[derive(Parser)]
#[command(name = "srvsweep")]
#[command(version)]
#[command(about = "Finds HTTPS hosts that answer 200 and name their server.")]
pub struct CommandLine {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Print less (-q hides per-address failures, -qq only prints the summary)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long)]
    pub no_banner: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Comma-separated CIDR blocks, start-end ranges, address files, or
    /// `<file` naming a file of such inputs. Prompted for when omitted.
    pub targets: Option<String>,

    /// Number of concurrent probes. Prompted for when omitted.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds. Prompted for when omitted.
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// File qualifying addresses are appended to. Prompted for when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Addresses submitted before waiting for all of them to finish
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Port the HTTPS request goes to
    #[arg(long, default_value_t = DEFAULT_HTTPS_PORT)]
    pub port: u16,

    /// Accept invalid and self-signed certificates
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Offer to run again with new inputs when some were invalid
    #[arg(long)]
    pub retry: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
