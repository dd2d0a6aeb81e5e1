//! # dynval
//!
//! Low-level helpers for the dynamic values a rendering library passes
//! around: structural copies, recursive merging, iteration over arrays and
//! mappings, type tests, receiver binding, class inheritance through
//! delegating prototypes, and a lazily created 2D drawing context.
//!
//! ## Quick Example
//!
//! ```
//! use dynval::{clone, filter, index_of, merge, Value};
//!
//! // Merge defaults into a style without clobbering what is already set
//! let style = Value::from_json_str(r#"{"fill": "red", "stroke": {"width": 2}}"#).unwrap();
//! let defaults = Value::from_json_str(
//!     r##"{"fill": "black", "stroke": {"width": 1, "color": "#000"}, "opacity": 1}"##,
//! )
//! .unwrap();
//! merge(&style, &defaults, false, true);
//! assert_eq!(
//!     style.to_json().unwrap(),
//!     serde_json::json!({
//!         "fill": "red",
//!         "stroke": {"width": 2, "color": "#000"},
//!         "opacity": 1
//!     })
//! );
//!
//! // A deep copy no longer shares nested mappings
//! let copy = clone(&style, true);
//! assert_eq!(copy, style);
//! assert!(!copy.strict_eq(&style));
//!
//! // Iteration helpers take function values
//! let list = Value::array(vec![Value::from(1), Value::from(2), Value::from(3)]);
//! let is_even = Value::function(|_this, args| {
//!     Ok(Value::from(args[0].as_f64().unwrap_or(0.0) % 2.0 == 0.0))
//! });
//! let evens = filter(&list, &is_even, &Value::Null).unwrap().unwrap();
//! assert_eq!(evens, Value::array(vec![Value::from(2)]));
//! assert_eq!(index_of(&list, &Value::from(3)), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Values (`value`)**: the [`Value`] sum type and its [`Kind`]
//!   classification. Arrays and mappings are shared handles.
//! - **Copies (`copy`)**: shallow and deep structural copies.
//! - **Merging (`merge`)**: in-place recursive merge with `overwrite` and
//!   `deep` flags.
//! - **Iteration (`iter`)**: `each`, `map` and `filter` over arrays,
//!   array-likes and mappings.
//! - **Type tests (`predicates`)**: `is_array`, `is_object`,
//!   `is_array_like`, `is_dom`.
//! - **Functions (`function`)**: callable values and `bind`.
//! - **Classes (`class`)**: `inherits` over delegating prototypes.
//! - **Search (`search`)**: `index_of`.
//! - **Drawing context (`context`)**: an owned, lazily created 2D context.
//!
//! All of it is single-threaded: values are built on `Rc` and `RefCell`.

pub mod class;
pub mod context;
pub mod convert;
pub mod copy;
pub mod error;
pub mod function;
pub mod iter;
pub mod merge;
pub mod predicates;
pub mod search;
pub mod value;

pub use class::{inherits, Class, Instance};
pub use context::{Context2d, ContextCache};
pub use copy::{clone, clone_with, try_clone, CloneOptions};
pub use error::{Error, Result};
pub use function::{bind, Function};
pub use iter::{each, filter, for_each_entry, map};
pub use merge::{merge, merge_with, MergeOptions};
pub use predicates::{is_array, is_array_like, is_dom, is_object};
pub use search::index_of;
pub use value::{DomNode, Key, Kind, Value};

#[cfg(test)]
mod value_proptest;
