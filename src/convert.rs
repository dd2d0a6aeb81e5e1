//! Conversions between [`Value`] and serde documents
//!
//! JSON and YAML documents map onto the data-only part of [`Value`]: `null`,
//! booleans, numbers, strings, arrays and plain mappings. Functions, opaque
//! built-ins and DOM nodes have no document form, so [`Value::to_json`]
//! rejects them.

use std::path::Path;
use std::rc::Rc;

use log::debug;
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::error::{Error, Result};
use crate::value::Value;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

impl Value {
    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let json: JsonValue = serde_json::from_str(content)?;
        Ok(Value::from(json))
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let json: JsonValue = serde_yaml::from_str(content)?;
        Ok(Value::from(json))
    }

    /// Read a JSON or YAML file, choosing the parser by extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, and `Error::Json` or
    /// `Error::Yaml` if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        debug!(
            "Loading {} as {}",
            path.display(),
            if is_yaml { "YAML" } else { "JSON" }
        );

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Convert to a JSON document.
    ///
    /// Integral numbers are emitted as JSON integers.
    ///
    /// # Errors
    ///
    /// Returns `Error::Conversion` for functions, opaque built-ins, DOM nodes,
    /// non-finite numbers and cyclic structures.
    pub fn to_json(&self) -> Result<JsonValue> {
        let mut ancestors = Vec::new();
        to_json_inner(self, &mut ancestors)
    }
}

fn number_to_json(n: f64) -> Result<JsonValue> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Ok(JsonValue::Number(Number::from(n as i64)));
    }
    Number::from_f64(n)
        .map(JsonValue::Number)
        .ok_or_else(|| Error::Conversion {
            message: format!("Number {} has no JSON representation", n),
        })
}

fn to_json_inner(value: &Value, ancestors: &mut Vec<*const ()>) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Array(items) => {
            let addr = Rc::as_ptr(items) as *const ();
            enter(addr, ancestors)?;
            let converted = items
                .borrow()
                .iter()
                .map(|item| to_json_inner(item, ancestors))
                .collect::<Result<Vec<_>>>();
            ancestors.pop();
            Ok(JsonValue::Array(converted?))
        }
        Value::Object(map) => {
            let addr = Rc::as_ptr(map) as *const ();
            enter(addr, ancestors)?;
            let converted = map
                .borrow()
                .iter()
                .map(|(k, v)| -> Result<(String, JsonValue)> {
                    Ok((k.clone(), to_json_inner(v, ancestors)?))
                })
                .collect::<Result<JsonMap<String, JsonValue>>>();
            ancestors.pop();
            Ok(JsonValue::Object(converted?))
        }
        other => Err(Error::Conversion {
            message: format!("A {} value has no JSON representation", other.type_name()),
        }),
    }
}

fn enter(addr: *const (), ancestors: &mut Vec<*const ()>) -> Result<()> {
    if ancestors.contains(&addr) {
        return Err(Error::Conversion {
            message: "Cyclic structures have no JSON representation".to_string(),
        });
    }
    ancestors.push(addr);
    Ok(())
}
