//! Structural copies of values
//!
//! [`clone`] copies arrays and plain mappings into fresh handles, either one
//! level deep (nested handles shared with the source) or all the way down.
//! Primitives come back as they are, and opaque built-ins and DOM nodes come
//! back as the same handle even under a deep copy.
//!
//! ## Cycles
//!
//! `clone` does not look for cycles. Deep-copying a structure that contains
//! itself recurses until the stack overflows. [`try_clone`] performs the same
//! copy but tracks the handles on the current path and reports a cycle as
//! [`Error::CycleDetected`].

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::{Map, Value};

/// Options for structural copies
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CloneOptions {
    /// Copy nested arrays and mappings too (default: false)
    pub deep: bool,
}

/// Produce a structural copy of `source`.
///
/// Arrays and plain mappings get new handles; their elements are copied
/// recursively when `deep` is set and shared otherwise. Everything else is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use dynval::{clone, Value};
///
/// let inner = Value::array(vec![Value::from(1)]);
/// let outer = Value::array(vec![inner.clone()]);
///
/// let shallow = clone(&outer, false);
/// assert!(!shallow.strict_eq(&outer));
/// assert!(shallow.as_array().unwrap().borrow()[0].strict_eq(&inner));
///
/// let deep = clone(&outer, true);
/// assert!(!deep.as_array().unwrap().borrow()[0].strict_eq(&inner));
/// ```
pub fn clone(source: &Value, deep: bool) -> Value {
    match source {
        Value::Array(items) => {
            let copied: Vec<Value> = items
                .borrow()
                .iter()
                .map(|item| if deep { clone(item, deep) } else { item.clone() })
                .collect();
            Value::array(copied)
        }
        Value::Object(map) => {
            let copied: Map = map
                .borrow()
                .iter()
                .map(|(key, item)| {
                    let item = if deep { clone(item, deep) } else { item.clone() };
                    (key.clone(), item)
                })
                .collect();
            Value::Object(Rc::new(RefCell::new(copied)))
        }
        _ => source.clone(),
    }
}

/// Copy `source` according to `options`
pub fn clone_with(source: &Value, options: &CloneOptions) -> Value {
    clone(source, options.deep)
}

/// Like [`clone`], but fails with [`Error::CycleDetected`] instead of
/// recursing forever when a deep copy reaches one of its own ancestors.
///
/// Shared handles that are not ancestors (a diamond) are copied once per
/// occurrence, exactly as `clone` does.
pub fn try_clone(source: &Value, deep: bool) -> Result<Value> {
    let mut ancestors = Vec::new();
    let mut path = vec!["$".to_string()];
    try_clone_inner(source, deep, &mut ancestors, &mut path)
}

fn handle_addr(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(Rc::as_ptr(items) as *const () as usize),
        Value::Object(map) => Some(Rc::as_ptr(map) as *const () as usize),
        _ => None,
    }
}

fn try_clone_inner(
    source: &Value,
    deep: bool,
    ancestors: &mut Vec<usize>,
    path: &mut Vec<String>,
) -> Result<Value> {
    let Some(addr) = handle_addr(source) else {
        return Ok(source.clone());
    };

    if ancestors.contains(&addr) {
        let path = path.concat();
        warn!("Refusing to copy cyclic structure at {}", path);
        return Err(Error::CycleDetected { path });
    }

    ancestors.push(addr);
    let result = copy_entries(source, deep, ancestors, path);
    ancestors.pop();
    result
}

fn copy_entries(
    source: &Value,
    deep: bool,
    ancestors: &mut Vec<usize>,
    path: &mut Vec<String>,
) -> Result<Value> {
    let mut copy_item = |segment: String, item: &Value| -> Result<Value> {
        if !deep {
            return Ok(item.clone());
        }
        path.push(segment);
        let copied = try_clone_inner(item, deep, ancestors, path);
        path.pop();
        copied
    };

    match source {
        Value::Array(items) => {
            let items = items.borrow();
            let mut copied = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                copied.push(copy_item(format!("[{}]", i), item)?);
            }
            Ok(Value::array(copied))
        }
        Value::Object(map) => {
            let map = map.borrow();
            let mut copied = Map::new();
            for (key, item) in map.iter() {
                copied.insert(key.clone(), copy_item(format!(".{}", key), item)?);
            }
            Ok(Value::Object(Rc::new(RefCell::new(copied))))
        }
        _ => Ok(source.clone()),
    }
}
