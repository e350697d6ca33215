//! playcaller CLI - Learn when to pass, run or kick
//!
//! This CLI provides a unified interface for:
//! - Training the TD play caller against an outcome source
//! - Running the random play-calling baseline

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "playcaller")]
#[command(version, about = "Play-calling reinforcement learning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the TD agent and print its learned play calls
    Train(Box<playcaller::cli::commands::train::TrainArgs>),

    /// Play possessions with random play calls
    Random(playcaller::cli::commands::random::RandomArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => playcaller::cli::commands::train::execute(*args),
        Commands::Random(args) => playcaller::cli::commands::random::execute(args),
    }
}
