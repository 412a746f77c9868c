mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use piiscan_config::Config;

fn main() -> Result<()> {
    // Initialize tracing (stderr, quiet unless RUST_LOG says otherwise)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::Scan(args) => commands::scan::handle(args, &config),
        cli::Commands::Config => commands::config::handle(&config),
    }
}
