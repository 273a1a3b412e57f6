//! Command-line interface definitions.
//!
//! Defines the CLI structure for the laybook application using `clap`:
//! live trading, offline replay of recorded markets, and configuration
//! checks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Exchange betting engine
#[derive(Parser, Debug)]
#[command(name = "laybook")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the laybook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover upcoming markets and trade them until interrupted
    Run(RunArgs),

    /// Replay recorded market stream files against the paper sink
    Replay(ReplayArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `laybook run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Size orders but fill them on the paper sink instead of the venue
    #[arg(long)]
    pub dry_run: bool,

    /// Override the maximum number of markets traded at once
    #[arg(long)]
    pub max_markets: Option<usize>,
}

/// Arguments for `laybook replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Stream log files (`.gz` files are decompressed)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Subcommands for `laybook config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file for correctness.
    Validate,
    /// Display the effective configuration with defaults applied.
    Show,
}
