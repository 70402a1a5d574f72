//! kinexam CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kinexam", version, about = "Seed-personalized physics exam harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the exam interactively
    Start {
        /// Directory the grade file is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Check the integrity of a grade file
    Verify {
        /// Path to the .dat grade file
        #[arg(long)]
        record: PathBuf,
    },

    /// Show the graded detail inside a grade file
    Inspect {
        /// Path to the .dat grade file
        #[arg(long)]
        record: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kinexam_core=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start { output } => commands::start::execute(output),
        Commands::Verify { record } => commands::verify::execute(record),
        Commands::Inspect { record } => commands::inspect::execute(record),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
