//! Kumo CLI main entry point

use anyhow::Result;
use clap::Parser;
use kumo_cli::commands::{execute, Cli};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = execute(cli.command)?;

    // Exit with appropriate code
    if result.success {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
