//! Churn pipeline CLI.

use churn_cli::logging::{LogConfig, init_logging};
use clap::Parser;

mod cli;
mod commands;
mod summary;

use crate::cli::Cli;
use crate::commands::run_pipeline;
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&LogConfig::from(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    match run_pipeline(&cli) {
        Ok((settings, run)) => print_summary(&settings, &run),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}
