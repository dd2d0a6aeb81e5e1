//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// dynval - Merge and copy JSON/YAML documents the way the value helpers do
#[derive(Parser, Debug)]
#[command(name = "dynval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge SOURCE into TARGET and print the result
    Merge(commands::merge::MergeArgs),

    /// Print a structural copy of a document
    Clone(commands::clone::CloneArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .filter_level(self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Merge(args) => commands::merge::execute(args),
            Commands::Clone(args) => commands::clone::execute(args),
        }
    }
}
