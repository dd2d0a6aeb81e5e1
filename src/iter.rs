//! Polymorphic iteration over arrays, array-likes and plain mappings
//!
//! [`each`], [`map`] and [`filter`] take the callback as a [`Value`] and call
//! it as `callback(value, key, collection)` with an optional receiver. A
//! falsy collection or callback makes the call a no-op; a callback that is
//! not a function fails with [`Error::NotCallable`] the first time it is
//! called.
//!
//! ## Traversal order
//!
//! - Arrays are walked by index. The length is read once up front; entries
//!   removed while walking are skipped.
//! - Values with a numeric `length` that are not arrays (strings, and
//!   mappings with a `length` entry) are walked over `0..length`. Missing
//!   entries read as `Null`.
//! - Any other mapping is walked over its own keys in sorted order.
//!
//! [`map`] and [`filter`] only ever walk `0..length`, so a mapping without a
//! `length` entry produces an empty array.
//!
//! [`Error::NotCallable`]: crate::error::Error::NotCallable

use crate::error::Result;
use crate::function::invoke;
use crate::value::{Key, Value};

/// Walk the entries of `collection`, calling `f(value, key)` for each.
///
/// This is the closure-based core of [`each`]; it performs no truthiness
/// check on `collection`. An error returned by `f` stops the walk.
pub fn for_each_entry<F>(collection: &Value, mut f: F) -> Result<()>
where
    F: FnMut(Value, Key) -> Result<()>,
{
    if let Value::Array(items) = collection {
        let len = items.borrow().len();
        for i in 0..len {
            let item = items.borrow().get(i).cloned();
            if let Some(item) = item {
                f(item, Key::Index(i))?;
            }
        }
        return Ok(());
    }

    if let Some(len) = indexable_length(collection) {
        let mut i = 0usize;
        while (i as f64) < len {
            let item = collection.get(&Key::Index(i)).unwrap_or_default();
            f(item, Key::Index(i))?;
            i += 1;
        }
        return Ok(());
    }

    for (key, item) in collection.own_entries() {
        f(item, key)?;
    }
    Ok(())
}

/// Call `callback(value, key, collection)` for every entry of `collection`.
///
/// Does nothing if `collection` or `callback` is falsy.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use dynval::{each, Value};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let callback = Value::function(move |_this, args| {
///     sink.borrow_mut().push(args[0].clone());
///     Ok(Value::Null)
/// });
///
/// let list = Value::array(vec![Value::from(1), Value::from(2)]);
/// each(&list, &callback, &Value::Null).unwrap();
/// assert_eq!(seen.borrow().len(), 2);
/// ```
pub fn each(collection: &Value, callback: &Value, context: &Value) -> Result<()> {
    if !(collection.is_truthy() && callback.is_truthy()) {
        return Ok(());
    }

    for_each_entry(collection, |item, key| {
        invoke(callback, context, &[item, Value::from(key), collection.clone()])?;
        Ok(())
    })
}

/// Collect `callback(value, index, collection)` over `0..length` into a new array.
///
/// Returns `Ok(None)` if `collection` or `callback` is falsy.
pub fn map(collection: &Value, callback: &Value, context: &Value) -> Result<Option<Value>> {
    if !(collection.is_truthy() && callback.is_truthy()) {
        return Ok(None);
    }

    let mut result = Vec::new();
    for_each_index(collection, |item, i| {
        result.push(invoke(
            callback,
            context,
            &[item, Value::from(i), collection.clone()],
        )?);
        Ok(())
    })?;
    Ok(Some(Value::array(result)))
}

/// Collect the elements over `0..length` for which
/// `callback(value, index, collection)` is truthy into a new array.
///
/// Returns `Ok(None)` if `collection` or `callback` is falsy.
pub fn filter(collection: &Value, callback: &Value, context: &Value) -> Result<Option<Value>> {
    if !(collection.is_truthy() && callback.is_truthy()) {
        return Ok(None);
    }

    let mut result = Vec::new();
    for_each_index(collection, |item, i| {
        let keep = invoke(
            callback,
            context,
            &[item.clone(), Value::from(i), collection.clone()],
        )?;
        if keep.is_truthy() {
            result.push(item);
        }
        Ok(())
    })?;
    Ok(Some(Value::array(result)))
}

/// `length` of a non-array that can be walked by index
fn indexable_length(collection: &Value) -> Option<f64> {
    match collection {
        Value::String(_) | Value::Object(_) => collection.length().filter(|len| !len.is_nan()),
        _ => None,
    }
}

fn for_each_index<F>(collection: &Value, mut f: F) -> Result<()>
where
    F: FnMut(Value, usize) -> Result<()>,
{
    let len = match collection {
        Value::Array(items) => items.borrow().len() as f64,
        _ => indexable_length(collection).unwrap_or(0.0),
    };

    let mut i = 0usize;
    while (i as f64) < len {
        let item = collection.get(&Key::Index(i)).unwrap_or_default();
        f(item, i)?;
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(Value, Value)>>>;

    /// Callback recording `(value, key)` and returning `value`
    fn recorder() -> (Value, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let callback = Value::function(move |_this, args| {
            sink.borrow_mut().push((args[0].clone(), args[1].clone()));
            Ok(args[0].clone())
        });
        (callback, calls)
    }

    fn is_even() -> Value {
        Value::function(|_this, args| {
            let n = args[0].as_f64().unwrap_or(f64::NAN);
            Ok(Value::from(n % 2.0 == 0.0))
        })
    }

    fn numbers() -> Value {
        Value::array(vec![Value::from(1), Value::from(2), Value::from(3)])
    }

    mod each_tests {
        use super::*;

        #[test]
        fn test_each_array_in_index_order() {
            let (callback, calls) = recorder();
            each(&numbers(), &callback, &Value::Null).unwrap();
            assert_eq!(
                *calls.borrow(),
                vec![
                    (Value::from(1), Value::from(0)),
                    (Value::from(2), Value::from(1)),
                    (Value::from(3), Value::from(2)),
                ]
            );
        }

        #[test]
        fn test_each_mapping_visits_each_key_once() {
            let (callback, calls) = recorder();
            let obj = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
            each(&obj, &callback, &Value::Null).unwrap();

            let mut keys: Vec<String> = calls
                .borrow()
                .iter()
                .map(|(_, key)| key.as_str().unwrap().to_string())
                .collect();
            keys.sort();
            assert_eq!(keys, vec!["a", "b"]);
        }

        #[test]
        fn test_each_array_like_by_index() {
            let (callback, calls) = recorder();
            let obj = Value::object([
                ("length", Value::from(3)),
                ("0", Value::from("x")),
                ("2", Value::from("z")),
            ]);
            each(&obj, &callback, &Value::Null).unwrap();
            assert_eq!(
                *calls.borrow(),
                vec![
                    (Value::from("x"), Value::from(0)),
                    (Value::Null, Value::from(1)),
                    (Value::from("z"), Value::from(2)),
                ]
            );
        }

        #[test]
        fn test_each_nan_length_falls_back_to_keys() {
            let (callback, calls) = recorder();
            let obj = Value::object([("length", Value::from(f64::NAN))]);
            each(&obj, &callback, &Value::Null).unwrap();
            assert_eq!(calls.borrow().len(), 1);
            assert_eq!(calls.borrow()[0].1, Value::from("length"));
        }

        #[test]
        fn test_each_string_by_character() {
            let (callback, calls) = recorder();
            each(&Value::from("ab"), &callback, &Value::Null).unwrap();
            assert_eq!(calls.borrow()[1], (Value::from("b"), Value::from(1)));
        }

        #[test]
        fn test_each_passes_context_and_collection() {
            let context = Value::object([("tag", Value::from("ctx"))]);
            let list = numbers();
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = seen.clone();
            let callback = Value::function(move |this, args| {
                sink.borrow_mut().push((this.clone(), args[2].clone()));
                Ok(Value::Null)
            });

            each(&list, &callback, &context).unwrap();

            for (this, collection) in seen.borrow().iter() {
                assert!(this.strict_eq(&context));
                assert!(collection.strict_eq(&list));
            }
        }

        #[test]
        fn test_each_noop_on_falsy_arguments() {
            let (callback, calls) = recorder();
            each(&Value::Null, &callback, &Value::Null).unwrap();
            each(&Value::from(0), &callback, &Value::Null).unwrap();
            each(&numbers(), &Value::Null, &Value::Null).unwrap();
            assert!(calls.borrow().is_empty());
        }

        #[test]
        fn test_each_non_function_callback_fails() {
            let result = each(&numbers(), &Value::from("not a function"), &Value::Null);
            assert!(matches!(result, Err(Error::NotCallable { .. })));
        }

        #[test]
        fn test_each_skips_entries_removed_during_walk() {
            let list = numbers();
            let handle = list.clone();
            let count = Rc::new(RefCell::new(0));
            let counter = count.clone();
            let callback = Value::function(move |_this, _args| {
                *counter.borrow_mut() += 1;
                handle.as_array().unwrap().borrow_mut().pop();
                Ok(Value::Null)
            });

            each(&list, &callback, &Value::Null).unwrap();
            // Visits index 0 (pops 3), index 1 (pops 2), index 2 is gone
            assert_eq!(*count.borrow(), 2);
        }

        #[test]
        fn test_for_each_entry_stops_on_error() {
            let mut visited = 0;
            let result = for_each_entry(&numbers(), |_item, key| {
                visited += 1;
                if key == Key::Index(1) {
                    return Err(Error::Conversion {
                        message: "stop".to_string(),
                    });
                }
                Ok(())
            });
            assert!(result.is_err());
            assert_eq!(visited, 2);
        }
    }

    mod map_filter_tests {
        use super::*;

        #[test]
        fn test_map_is_even() {
            let result = map(&numbers(), &is_even(), &Value::Null).unwrap().unwrap();
            assert_eq!(
                result,
                Value::array(vec![
                    Value::from(false),
                    Value::from(true),
                    Value::from(false)
                ])
            );
        }

        #[test]
        fn test_filter_is_even() {
            let result = filter(&numbers(), &is_even(), &Value::Null)
                .unwrap()
                .unwrap();
            assert_eq!(result, Value::array(vec![Value::from(2)]));
        }

        #[test]
        fn test_map_returns_new_array() {
            let (callback, _) = recorder();
            let list = numbers();
            let result = map(&list, &callback, &Value::Null).unwrap().unwrap();
            assert!(!result.strict_eq(&list));
            assert_eq!(result, list);
        }

        #[test]
        fn test_map_mapping_without_length_is_empty() {
            let (callback, calls) = recorder();
            let obj = Value::object([("a", Value::from(1))]);
            let result = map(&obj, &callback, &Value::Null).unwrap().unwrap();
            assert_eq!(result, Value::array(vec![]));
            assert!(calls.borrow().is_empty());
        }

        #[test]
        fn test_filter_array_like() {
            let obj = Value::object([
                ("length", Value::from(2)),
                ("0", Value::from(4)),
                ("1", Value::from(5)),
            ]);
            let result = filter(&obj, &is_even(), &Value::Null).unwrap().unwrap();
            assert_eq!(result, Value::array(vec![Value::from(4)]));
        }

        #[test]
        fn test_map_filter_noop_on_falsy_arguments() {
            assert!(map(&Value::Null, &is_even(), &Value::Null).unwrap().is_none());
            assert!(filter(&numbers(), &Value::Null, &Value::Null)
                .unwrap()
                .is_none());
        }

        #[test]
        fn test_filter_keeps_element_handles() {
            let inner = Value::array(vec![]);
            let list = Value::array(vec![inner.clone()]);
            let keep_all = Value::function(|_this, _args| Ok(Value::from(true)));
            let result = filter(&list, &keep_all, &Value::Null).unwrap().unwrap();
            assert!(result.as_array().unwrap().borrow()[0].strict_eq(&inner));
        }
    }
}
