//! Catena CLI — simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "catena")]
#[command(version, about = "Catena — position-based rope and cable simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Simulate {
        /// Path to simulation config (TOML).
        #[arg(short, long, default_value = "rope.toml")]
        config: String,

        /// Write final positions and metrics as JSON.
        #[arg(short, long)]
        output: Option<String>,

        /// Write a binary snapshot of the final state.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Run benchmark suite.
    Bench {
        /// Which scenario to run (hanging_chain, stiff_cantilever, soft_pendulum, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a rope snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a simulation input file.
    Validate {
        /// Path to input file (TOML or JSON).
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            output,
            snapshot,
        } => commands::simulate(&config, output.as_deref(), snapshot.as_deref()),
        Commands::Bench { scenario, output } => commands::bench(&scenario, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
