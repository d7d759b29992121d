//! RPS Maze CLI
//!
//! Usage:
//!   rps-maze simulate [--config FILE] [--ticks N] [--seed N]   - Run the demo maze headless
//!   rps-maze simulate --interactive                            - Pick the player's duel moves
//!   rps-maze init [dir]                                        - Write a default config

use clap::{Parser, Subcommand};
use maze_app::commands::{InitCommand, SimulateCommand};
use maze_app::output::print_error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rps-maze")]
#[command(about = "RPS Maze - rock-paper-scissors keys, doors and duels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo maze
    Simulate(SimulateCommand),
    /// Write a default rps-maze.json
    Init(InitCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate(cmd) => cmd.run().await.map(|_| ()),
        Commands::Init(cmd) => cmd.run().map(|_| ()),
    };

    if let Err(e) = &result {
        print_error(&e.to_string());
    }
    result
}
