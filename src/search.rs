//! Linear search

use crate::value::{Key, Value};

/// Position of the first element strictly equal to `value`, or -1.
///
/// Arrays compare elements with [`Value::strict_eq`]. A string haystack
/// searches for the needle's string form and reports the character index of
/// its first occurrence; numbers, booleans and `Null` are converted first
/// (`1` searches for `"1"`, `Null` for `"null"`), while arrays, mappings and
/// other handles never match. Other values with a numeric `length` are
/// scanned over `0..length`. Anything else yields -1.
///
/// # Examples
///
/// ```
/// use dynval::{index_of, Value};
///
/// let list = Value::array(vec![Value::from(1), Value::from(2), Value::from(3)]);
/// assert_eq!(index_of(&list, &Value::from(2)), 1);
/// assert_eq!(index_of(&list, &Value::from(9)), -1);
/// ```
pub fn index_of(array: &Value, value: &Value) -> isize {
    match array {
        Value::Array(items) => items
            .borrow()
            .iter()
            .position(|item| item.strict_eq(value))
            .map_or(-1, |i| i as isize),
        Value::String(haystack) => match needle_text(value) {
            Some(needle) => haystack
                .find(needle.as_str())
                .map_or(-1, |byte_pos| haystack[..byte_pos].chars().count() as isize),
            None => -1,
        },
        _ => scan(array, value),
    }
}

/// String form of a primitive needle
fn needle_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) if n.is_nan() => Some("NaN".to_string()),
        Value::Number(n) if n.is_infinite() => {
            Some(if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
        }
        Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e21 => Some(format!("{}", *n as i128)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scan(array: &Value, value: &Value) -> isize {
    let Some(len) = array.length() else {
        return -1;
    };

    let mut i = 0usize;
    while (i as f64) < len {
        if array
            .get(&Key::Index(i))
            .unwrap_or_default()
            .strict_eq(value)
        {
            return i as isize;
        }
        i += 1;
    }
    -1
}
