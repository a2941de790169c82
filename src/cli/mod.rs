use clap::{Parser, Subcommand};

mod commands;
pub use commands::*;

#[derive(Parser)]
#[command(name = "nowplay")]
#[command(about = "A CLI tool for inspecting and watching macOS now-playing media metadata")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the current now-playing snapshot
    Now {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a snapshot every time the now-playing info changes
    Watch {
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
}
