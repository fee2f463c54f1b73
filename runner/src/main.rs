use anyhow::Result;
use clap::Parser;

use runner::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    runner::run(Cli::parse())
}
