//! CLI frontend for the Brasslantern interactive-fiction engine.

mod commands;
mod slot;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "brasslantern",
    about = "Brasslantern, a deterministic text-adventure interpreter",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game, reading commands from stdin
    Play {
        /// World dataset JSON file (default: the built-in world)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// RNG seed; equal seeds replay the same fights
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Save-slot file
        #[arg(long, default_value = "brasslantern-save.json")]
        save: PathBuf,
    },

    /// Validate a world dataset file and print a summary
    Check {
        /// World dataset JSON file
        data: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { data, seed, save } => commands::play::run(data.as_deref(), seed, &save),
        Commands::Check { data } => commands::check::run(&data),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
