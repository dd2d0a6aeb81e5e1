//! # Error Handling
//!
//! This module defines the centralized error type for `dynval`. It uses the
//! `thiserror` library to derive a single `Error` enum covering every failure
//! an operation can report.
//!
//! Most operations in this crate never fail: a falsy collection or target is
//! a silent no-op rather than an error. The variants below cover what is left:
//!
//! - Invoking a value that is not a function.
//! - Looking up a method that no prototype in the chain defines.
//! - A cycle found by `try_clone`.
//! - Converting a value that has no JSON representation.
//! - Creating a drawing surface.
//! - Parsing regular expressions, JSON and YAML, and reading input files.
//!
//! The `Result` type alias is used to return `Result<T, Error>` from
//! functions, making it easy to propagate errors with `?`.

use thiserror::Error;

/// Main error type for dynval operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value was called as a function but is not one.
    #[error("Value is not callable: {kind}")]
    NotCallable { kind: String },

    /// No prototype in an instance's chain defines the requested method.
    #[error("Method not found: {class}.{method}")]
    MethodNotFound { class: String, method: String },

    /// A structure refers back to one of its own ancestors.
    #[error("Cycle detected while copying: {path}")]
    CycleDetected { path: String },

    /// A value cannot be represented in the requested format.
    #[error("Conversion error: {message}")]
    Conversion { message: String },

    /// The drawing surface could not provide a 2D context.
    #[error("Drawing surface error: {message}")]
    Surface { message: String },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
