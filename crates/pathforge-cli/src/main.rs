//! PathForge command line.
//!
//! `pathforge plan` solves a problem file, `pathforge model` prints the
//! FlatZinc model for a single path length.

mod commands;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

#[derive(Parser, Debug)]
#[command(name = "pathforge", version, about = "Plans policy-compliant data paths")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the shortest feasible data path for a problem
    Plan {
        /// Problem file (.yaml, .yml or .json)
        #[arg(short, long)]
        problem: PathBuf,

        /// Optimizer configuration (.toml, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Solver executable; overrides the configuration and CSP_PATH
        #[arg(long)]
        solver: Option<PathBuf>,

        /// Longest path length to try
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the path as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the FlatZinc model for one path length
    Model {
        /// Problem file (.yaml, .yml or .json)
        #[arg(short, long)]
        problem: PathBuf,

        /// Number of modules on the path
        #[arg(short, long, default_value_t = 1)]
        length: usize,

        /// Write the model to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            problem,
            config,
            solver,
            max_depth,
            json,
        } => commands::plan(&commands::PlanArgs {
            problem,
            config,
            solver,
            max_depth,
            json,
        }),
        Commands::Model {
            problem,
            length,
            output,
        } => commands::model(&problem, length, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
