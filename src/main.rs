use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod export;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    commands::run(args)
}
