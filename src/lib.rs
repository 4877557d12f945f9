pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod packages;
pub mod report;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run pkgbar CLI entrypoint.
pub fn run_cli() {
    let args = cli::args::Cli::parse();
    ui::init_logging(args.global.verbose, args.global.quiet);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
