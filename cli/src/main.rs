mod commands;
mod terminal;

use commands::{CommandLine, scan};
use srvsweep_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };

    print::banner(cfg.no_banner, cfg.quiet);
    let result = scan::scan(commands.scan, &cfg).await;
    print::end_of_program(cfg.quiet);
    result
}
