//! # propguard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use propguard_cli::check::{run_check, CheckArgs};
use propguard_cli::explain::{run_explain, ExplainArgs};

/// Check JSON and YAML documents against a schema's additionalProperties
/// rules, rejecting or stripping keys the schema does not declare.
#[derive(Parser, Debug)]
#[command(name = "propguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validator options file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents, stripping additional keys under a strip mode.
    Check(CheckArgs),

    /// Show the compiled policy of every additionalProperties keyword.
    Explain(ExplainArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("propguard CLI starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, config),
        Commands::Explain(args) => run_explain(args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
