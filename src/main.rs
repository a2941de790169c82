mod cli;
mod config;
mod mediaremote;
mod models;
mod watch;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{App, Cli, Commands};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let app = App::new()?;

    match cli.command {
        Commands::Now { json } => {
            app.now(json)?;
        }
        Commands::Watch { json } => {
            app.watch(json)?;
        }
    }

    Ok(())
}
