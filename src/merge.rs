//! Recursive merge of plain mappings
//!
//! [`merge`] copies the own entries of a source value into a target value in
//! place and hands the target back.
//!
//! ## Rules
//!
//! For each own entry of the source:
//!
//! - If `deep` is set and the target's value at that key is a plain mapping,
//!   the source value is merged into it recursively with the same flags.
//! - Otherwise the source value is written (as a shared handle) when
//!   `overwrite` is set or when the target has no entry at that key.
//!
//! Arrays, opaque built-ins, DOM nodes and scalars in the target are never
//! descended into. Keys missing from the target are always filled in, and a
//! mapping introduced that way is the source's own handle, not a copy.
//!
//! ## Example
//!
//! ```
//! use dynval::{merge, Value};
//!
//! let target = Value::object([("a", Value::from(1))]);
//! let source = Value::object([("a", Value::from(2)), ("b", Value::from(3))]);
//!
//! merge(&target, &source, false, true);
//! assert_eq!(
//!     target,
//!     Value::object([("a", Value::from(1)), ("b", Value::from(3))])
//! );
//! ```

use log::trace;
use serde::Deserialize;

use crate::value::{Kind, Value};

/// Options for [`merge_with`]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MergeOptions {
    /// Replace values the target already has (default: false)
    pub overwrite: bool,
    /// Merge into nested mappings instead of replacing them (default: true)
    pub deep: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            deep: true,
        }
    }
}

/// Merge the own entries of `source` into `target`.
///
/// Returns `None` without touching anything when `target` is falsy.
/// Otherwise returns `Some(target)`, the same handle that was passed in.
///
/// # Arguments
///
/// * `target` - The value to merge into (modified in place)
/// * `source` - The value whose own entries are merged
/// * `overwrite` - Replace values the target already has
/// * `deep` - Merge into nested plain mappings of the target
pub fn merge(target: &Value, source: &Value, overwrite: bool, deep: bool) -> Option<Value> {
    if !target.is_truthy() {
        return None;
    }

    for (key, source_value) in source.own_entries() {
        let target_value = target.get(&key);

        match target_value {
            Some(nested) if deep && nested.kind() == Kind::Mapping => {
                trace!("Merging nested mapping at key '{}'", key);
                merge(&nested, &source_value, overwrite, deep);
            }
            _ => {
                if overwrite || !target.has(&key) {
                    target.set(&key, source_value);
                }
            }
        }
    }

    Some(target.clone())
}

/// Merge according to `options`
pub fn merge_with(target: &Value, source: &Value, options: &MergeOptions) -> Option<Value> {
    merge(target, source, options.overwrite, options.deep)
}
