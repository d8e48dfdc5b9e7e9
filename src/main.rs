mod cli;
mod display;
mod error;
mod interrupt;
mod models;
mod prompt;
mod runner;
mod timing;
mod verification;
mod workspace;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    cli::run(cli);
}
