//! Dynamic values and their runtime classification
//!
//! Every operation in this crate works on [`Value`], a closed sum type over
//! the shapes a rendering library passes around: scalars, arrays, plain
//! mappings, opaque built-ins (functions, dates, regular expressions, errors,
//! gradients) and DOM nodes.
//!
//! Arrays and mappings are shared, interior-mutable handles. Cloning a
//! `Value` through the [`Clone`] trait copies the handle, so two clones see
//! each other's mutations. Structural copies are made with
//! [`crate::copy::clone`].
//!
//! ## Classification
//!
//! [`Value::kind`] maps a value onto one of five [`Kind`]s. The copy, merge
//! and iteration operations dispatch on that tag instead of probing the value
//! repeatedly.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

use regex::Regex;

use crate::error::Result;
use crate::function::Function;

/// Entries of a plain mapping, enumerated in sorted key order.
pub type Map = BTreeMap<String, Value>;

/// Shared handle to an array.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared handle to a plain mapping.
pub type ObjectRef = Rc<RefCell<Map>>;

/// Node type of a DOM element.
pub const ELEMENT_NODE: u16 = 1;

/// Runtime value
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar (IEEE 754)
    Number(f64),
    /// String scalar
    String(String),
    /// Ordered sequence, shared by handle
    Array(ArrayRef),
    /// Plain mapping, shared by handle
    Object(ObjectRef),
    /// Callable value
    Function(Function),
    /// Opaque built-in that is never copied structurally
    Opaque(Rc<Opaque>),
    /// DOM node, treated as atomic
    Dom(Rc<DomNode>),
}

/// Runtime classification of a [`Value`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An ordered sequence
    Array,
    /// A plain mapping whose own keys are field/value pairs
    Mapping,
    /// A function, date, regular expression, error or gradient
    OpaqueBuiltin,
    /// A DOM node
    DomNode,
    /// `Null`, booleans, numbers and strings
    Primitive,
}

/// Opaque built-in values
#[derive(Debug)]
pub enum Opaque {
    /// A point in time
    Date(SystemTime),
    /// A compiled regular expression
    RegExp(Regex),
    /// An error carrying its message
    Error(String),
    /// A canvas gradient
    Gradient(Gradient),
}

impl Opaque {
    /// Runtime tag of the built-in, as a canvas environment would report it.
    pub fn tag(&self) -> &'static str {
        match self {
            Opaque::Date(_) => "Date",
            Opaque::RegExp(_) => "RegExp",
            Opaque::Error(_) => "Error",
            Opaque::Gradient(_) => "CanvasGradient",
        }
    }
}

/// Geometry of a canvas gradient
#[derive(Clone, Debug, PartialEq)]
pub enum GradientShape {
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    Radial {
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
    },
}

/// A color stop within a gradient
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, in `0.0..=1.0`
    pub offset: f64,
    /// CSS color string
    pub color: String,
}

/// A canvas gradient: a shape plus its color stops
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// Create a gradient with no color stops
    pub fn new(shape: GradientShape) -> Self {
        Self {
            shape,
            stops: Vec::new(),
        }
    }

    /// Add a color stop, clamping the offset into `0.0..=1.0`
    pub fn add_color_stop(mut self, offset: f64, color: impl Into<String>) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color: color.into(),
        });
        self
    }
}

/// A DOM node as seen by the helpers: its node type and name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomNode {
    pub node_type: u16,
    pub node_name: String,
}

impl DomNode {
    /// Create an element node (`node_type == 1`)
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            node_type: ELEMENT_NODE,
            node_name: name.into(),
        }
    }
}

/// Position passed to iteration callbacks: an array index or a mapping key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A numeric index into an array or array-like value
    Index(usize),
    /// A named key of a plain mapping
    Name(String),
}

impl Key {
    /// The key as a mapping entry name
    pub fn to_name(&self) -> String {
        match self {
            Key::Index(i) => i.to_string(),
            Key::Name(name) => name.clone(),
        }
    }

    /// The key as an array index, if it is one.
    ///
    /// A name counts as an index only in canonical decimal form below
    /// [`MAX_ARRAY_INDEX`]: no sign, no leading zeros unless it is `"0"`.
    /// `"01"` and `"+1"` stay plain names.
    pub fn to_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => parse_array_index(name),
        }
    }
}

/// Largest index a name can denote, exclusive
pub const MAX_ARRAY_INDEX: u32 = u32::MAX;

/// Writes may extend an array by at most this many slots at once
pub const MAX_ARRAY_GROWTH: usize = 1 << 16;

fn parse_array_index(name: &str) -> Option<usize> {
    let canonical = match name.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if !canonical {
        return None;
    }
    let index: u32 = name.parse().ok()?;
    if index >= MAX_ARRAY_INDEX {
        return None;
    }
    usize::try_from(index).ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(i) => Value::Number(i as f64),
            Key::Name(name) => Value::String(name),
        }
    }
}

impl Value {
    /// Build an array value from its elements
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Build a plain mapping from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: Map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Build an empty plain mapping
    pub fn empty_object() -> Self {
        Value::Object(Rc::new(RefCell::new(Map::new())))
    }

    /// Wrap a closure taking `(receiver, arguments)` as a function value
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Value::Function(Function::new(f))
    }

    pub fn date(time: SystemTime) -> Self {
        Value::Opaque(Rc::new(Opaque::Date(time)))
    }

    /// Compile `pattern` into a regular-expression value
    pub fn regexp(pattern: &str) -> Result<Self> {
        Ok(Value::Opaque(Rc::new(Opaque::RegExp(Regex::new(pattern)?))))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Opaque(Rc::new(Opaque::Error(message.into())))
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Value::Opaque(Rc::new(Opaque::Gradient(gradient)))
    }

    pub fn dom(node: DomNode) -> Self {
        Value::Dom(Rc::new(node))
    }

    /// Classify the value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Mapping,
            Value::Function(_) | Value::Opaque(_) => Kind::OpaqueBuiltin,
            Value::Dom(_) => Kind::DomNode,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Kind::Primitive,
        }
    }

    /// Short name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Opaque(opaque) => opaque.tag(),
            Value::Dom(_) => "dom",
        }
    }

    /// `Null`, `false`, `0`, `NaN` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strict identity: primitives by value, handles by pointer.
    ///
    /// `NaN` is never strictly equal to anything, itself included.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            (Value::Dom(a), Value::Dom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_dom(&self) -> Option<&DomNode> {
        match self {
            Value::Dom(node) => Some(node),
            _ => None,
        }
    }

    /// The value's numeric `length` attribute, if it has one.
    ///
    /// Arrays and strings report their element and character counts; a
    /// mapping reports its `length` entry when that entry is a number
    /// (including `NaN`).
    pub fn length(&self) -> Option<f64> {
        match self {
            Value::Array(items) => Some(items.borrow().len() as f64),
            Value::String(s) => Some(s.chars().count() as f64),
            Value::Object(map) => map.borrow().get("length").and_then(Value::as_f64),
            _ => None,
        }
    }

    /// Read the entry at `key`, if present.
    ///
    /// Arrays accept index keys, mappings accept any key by name and strings
    /// yield the character at an index.
    pub fn get(&self, key: &Key) -> Option<Value> {
        match self {
            Value::Array(items) => {
                let index = key.to_index()?;
                items.borrow().get(index).cloned()
            }
            Value::Object(map) => map.borrow().get(&key.to_name()).cloned(),
            Value::String(s) => {
                let index = key.to_index()?;
                s.chars().nth(index).map(|c| Value::String(c.to_string()))
            }
            _ => None,
        }
    }

    /// True if the entry at `key` exists, even when it holds `Null`
    pub fn has(&self, key: &Key) -> bool {
        match self {
            Value::Array(items) => key
                .to_index()
                .is_some_and(|index| index < items.borrow().len()),
            Value::Object(map) => map.borrow().contains_key(&key.to_name()),
            _ => false,
        }
    }

    /// Write `value` at `key`.
    ///
    /// Mappings accept any key. Arrays accept index keys and grow with `Null`
    /// to reach the index, by at most [`MAX_ARRAY_GROWTH`] slots; other keys
    /// and indices further out are ignored. Every other kind ignores the
    /// write. Returns whether the write took effect.
    pub fn set(&self, key: &Key, value: Value) -> bool {
        match self {
            Value::Object(map) => {
                map.borrow_mut().insert(key.to_name(), value);
                true
            }
            Value::Array(items) => {
                let Some(index) = key.to_index() else {
                    return false;
                };
                let mut items = items.borrow_mut();
                if index >= items.len() {
                    let Some(new_len) = index.checked_add(1) else {
                        return false;
                    };
                    if new_len - items.len() > MAX_ARRAY_GROWTH {
                        return false;
                    }
                    items.resize(new_len, Value::Null);
                }
                items[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of the value's own entries: mapping keys, or array indices.
    ///
    /// Every other kind has no own entries. The snapshot holds handles, so no
    /// borrow is kept alive while callers act on it.
    pub fn own_entries(&self) -> Vec<(Key, Value)> {
        match self {
            Value::Object(map) => map
                .borrow()
                .iter()
                .map(|(k, v)| (Key::Name(k.clone()), v.clone()))
                .collect(),
            Value::Array(items) => items
                .borrow()
                .iter()
                .enumerate()
                .map(|(i, v)| (Key::Index(i), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Structural equality.
///
/// Scalars compare by value, arrays and mappings by contents, and functions,
/// opaque built-ins and DOM nodes by handle. Comparing cyclic structures does
/// not terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => self.strict_eq(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl From<DomNode> for Value {
    fn from(node: DomNode) -> Self {
        Value::dom(node)
    }
}
