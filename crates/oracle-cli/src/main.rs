//! Operator console for the weekly Oracle draw engine.

mod commands;
mod console;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "oracle",
    about = "Oracle draw: a weekly community chance game",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game interactively, reading commands from stdin
    Play {
        /// RNG seed for reproducible draws (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Hours east of UTC used for day and week boundaries
        #[arg(long, default_value = "9", allow_hyphen_values = true)]
        offset: i32,

        /// JSON catalog file (default: built-in 22 effects)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Start a new cycle automatically every Thursday at 10:00 local time
        #[arg(long)]
        auto_reset: bool,
    },

    /// List the effects in the catalog
    Catalog {
        /// JSON catalog file (default: built-in 22 effects)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Play many cycles with scripted participants
    Simulate {
        /// Number of cycles to run
        #[arg(long, default_value = "10")]
        cycles: u32,

        /// Number of scripted participants
        #[arg(short, long, default_value = "5")]
        participants: u32,

        /// RNG seed for deterministic simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// JSON catalog file (default: built-in 22 effects)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            seed,
            offset,
            catalog,
            auto_reset,
        } => commands::play::run(seed, offset, catalog.as_deref(), auto_reset),
        Commands::Catalog { catalog } => commands::catalog::run(catalog.as_deref()),
        Commands::Simulate {
            cycles,
            participants,
            seed,
            catalog,
        } => commands::simulate::run(cycles, participants, seed, catalog.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
