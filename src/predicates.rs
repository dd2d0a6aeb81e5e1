//! Type tests over [`Value`]

use crate::value::{Value, ELEMENT_NODE};

/// True iff the value is an actual array, not merely array-like.
pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// True for functions and every non-null handle: arrays, mappings, opaque
/// built-ins and DOM nodes.
pub fn is_object(value: &Value) -> bool {
    !matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// True iff the value exposes a numeric `length`.
///
/// Falsy values and strings are never array-like. A `true` result does not
/// promise that the value is indexable beyond `length`.
pub fn is_array_like(value: &Value) -> bool {
    if !value.is_truthy() || matches!(value, Value::String(_)) {
        return false;
    }
    value.length().is_some()
}

/// True iff the value is a single DOM element node.
pub fn is_dom(value: &Value) -> bool {
    value
        .as_dom()
        .is_some_and(|node| node.node_type == ELEMENT_NODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DomNode;

    #[test]
    fn test_is_array() {
        assert!(is_array(&Value::array(vec![])));
        assert!(!is_array(&Value::object([("length", Value::from(0))])));
        assert!(!is_array(&Value::from("ab")));
    }

    #[test]
    fn test_is_object_includes_functions() {
        assert!(is_object(&Value::function(|_, _| Ok(Value::Null))));
        assert!(is_object(&Value::empty_object()));
        assert!(is_object(&Value::array(vec![])));
        assert!(is_object(&Value::error("e")));
        assert!(is_object(&Value::dom(DomNode::element("P"))));
        assert!(!is_object(&Value::Null));
        assert!(!is_object(&Value::from(1)));
        assert!(!is_object(&Value::from("s")));
    }

    #[test]
    fn test_is_array_like() {
        assert!(is_array_like(&Value::object([("length", Value::from(0))])));
        assert!(is_array_like(&Value::array(vec![])));
        assert!(!is_array_like(&Value::from("ab")));
        assert!(!is_array_like(&Value::Null));
        assert!(!is_array_like(&Value::from(0)));
        assert!(!is_array_like(&Value::empty_object()));
        assert!(!is_array_like(&Value::object([("length", Value::from("3"))])));
    }

    #[test]
    fn test_is_array_like_accepts_nan_length() {
        let value = Value::object([("length", Value::from(f64::NAN))]);
        assert!(is_array_like(&value));
    }

    #[test]
    fn test_is_dom() {
        assert!(is_dom(&Value::dom(DomNode::element("CANVAS"))));
        let text_node = DomNode {
            node_type: 3,
            node_name: "#text".to_string(),
        };
        assert!(!is_dom(&Value::dom(text_node)));
        assert!(!is_dom(&Value::object([
            ("nodeType", Value::from(1)),
            ("nodeName", Value::from("DIV")),
        ])));
        assert!(!is_dom(&Value::Null));
    }
}
