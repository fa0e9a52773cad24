use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd_check;
mod cmd_run;
mod tracing_init;

#[derive(Parser)]
#[command(name = "audiowatch", about = "Marketplace watch rule engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a batch of listings against the configured watch rules
    Run {
        /// Path to watch.toml config file
        #[arg(short, long)]
        config: PathBuf,
        /// JSON Lines listings file, or `-` for stdin
        #[arg(short, long)]
        listings: PathBuf,
        /// Append match events to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Compile every configured rule and report what would not load
    Check {
        /// Path to watch.toml config file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            listings,
            out,
        } => cmd_run::run(config, listings, out),
        Commands::Check { config } => cmd_check::run(config),
    }
}
