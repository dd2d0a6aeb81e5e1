//! Merge command implementation
//!
//! Loads two documents, merges the second into the first with
//! [`dynval::merge_with`] and prints the target.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use dynval::{merge_with, MergeOptions};

use super::{load_document, print_document};

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Document to merge into
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Document whose entries are merged into TARGET
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Replace values TARGET already has
    #[arg(short, long)]
    pub overwrite: bool,

    /// Do not descend into nested mappings
    #[arg(long)]
    pub shallow: bool,
}

impl MergeArgs {
    fn options(&self) -> MergeOptions {
        MergeOptions {
            overwrite: self.overwrite,
            deep: !self.shallow,
        }
    }
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    let target = load_document(&args.target)?;
    let source = load_document(&args.source)?;

    match merge_with(&target, &source, &args.options()) {
        Some(merged) => print_document(&merged),
        None => bail!(
            "Nothing to merge into: {} is empty or falsy",
            args.target.display()
        ),
    }
}
