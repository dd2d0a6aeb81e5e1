//! Clone command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use dynval::{clone_with, CloneOptions};

use super::{load_document, print_document};

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Document to copy
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Copy nested arrays and mappings too
    #[arg(short, long)]
    pub deep: bool,
}

/// Execute the clone command
pub fn execute(args: CloneArgs) -> Result<()> {
    let source = load_document(&args.file)?;
    let copy = clone_with(&source, &CloneOptions { deep: args.deep });
    print_document(&copy)
}
