//! # CLI Command Implementations
//!
//! Each subcommand of the `dynval` tool lives in its own file, with an
//! `Args` struct derived using `clap` and an `execute` function that calls
//! into the `dynval` library.
//!
//! The helpers below load input documents and print results, shared by all
//! commands.

pub mod clone;
pub mod merge;

use anyhow::Result;
use std::path::Path;

use dynval::Value;

/// Load a JSON or YAML document, choosing the parser by file extension.
pub fn load_document(path: &Path) -> Result<Value> {
    Value::from_file(path).map_err(|err| {
        let action = match &err {
            dynval::Error::Io(_) => "read",
            _ => "parse",
        };
        anyhow::Error::new(err).context(format!("Failed to {} {}", action, path.display()))
    })
}

/// Print a value as pretty JSON on stdout
pub fn print_document(value: &Value) -> Result<()> {
    let json = value.to_json()?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
