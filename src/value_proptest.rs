//! Property-based tests for copying, merging and search.
//!
//! These tests use proptest to generate random JSON-shaped documents and
//! verify that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::copy::clone;
    use crate::merge::merge;
    use crate::search::index_of;
    use crate::value::{Key, Value};
    use proptest::prelude::*;
    use serde_json::Value as JsonValue;

    /// Finite, JSON-representable documents up to a few levels deep
    fn arb_json() -> impl Strategy<Value = JsonValue> {
        let leaf = prop_oneof![
            Just(JsonValue::Null),
            any::<bool>().prop_map(JsonValue::Bool),
            (-1000i64..1000).prop_map(|n| JsonValue::Number(n.into())),
            "[a-z]{0,6}".prop_map(JsonValue::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|map| JsonValue::Object(map.into_iter().collect())),
            ]
        })
    }

    fn arb_object() -> impl Strategy<Value = JsonValue> {
        prop::collection::btree_map("[a-e]", arb_json(), 0..5)
            .prop_map(|map| JsonValue::Object(map.into_iter().collect()))
    }

    /// True if any array or mapping handle reachable from `a` is also reachable
    /// at the same position in `b`
    fn shares_nested_handle(a: &Value, b: &Value) -> bool {
        let (a_entries, b_entries) = (a.own_entries(), b.own_entries());
        a_entries.iter().zip(b_entries.iter()).any(|((_, x), (_, y))| {
            let shared = matches!(x, Value::Array(_) | Value::Object(_)) && x.strict_eq(y);
            shared || shares_nested_handle(x, y)
        })
    }

    // ============================================================================
    // clone property tests
    // ============================================================================

    proptest! {
        /// Property: a copy is structurally equal to its source
        #[test]
        fn clone_is_structurally_equal(doc in arb_json(), deep in any::<bool>()) {
            let source = Value::from(doc);
            prop_assert_eq!(clone(&source, deep), source);
        }

        /// Property: a deep copy shares no array or mapping handle with its source
        #[test]
        fn deep_clone_shares_no_nested_handles(doc in arb_json()) {
            let source = Value::from(doc);
            let copy = clone(&source, true);
            prop_assert!(!shares_nested_handle(&source, &copy));
        }

        /// Property: a shallow copy shares every first-level entry with its source
        #[test]
        fn shallow_clone_shares_first_level(doc in arb_object()) {
            let source = Value::from(doc);
            let copy = clone(&source, false);
            for (key, value) in source.own_entries() {
                let copied = copy.get(&key).unwrap();
                prop_assert!(copied.strict_eq(&value) || value.as_f64().is_some_and(f64::is_nan));
            }
        }
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: every key of the source is present in the target afterwards
        #[test]
        fn merge_adds_every_source_key(
            target in arb_object(),
            source in arb_object(),
            overwrite in any::<bool>(),
            deep in any::<bool>(),
        ) {
            let target = Value::from(target);
            let source = Value::from(source);
            merge(&target, &source, overwrite, deep);
            for (key, _) in source.own_entries() {
                prop_assert!(target.has(&key));
            }
        }

        /// Property: without overwrite, first-level scalars already in the target survive
        #[test]
        fn merge_without_overwrite_keeps_target_scalars(
            target in arb_object(),
            source in arb_object(),
            deep in any::<bool>(),
        ) {
            let target = Value::from(target);
            let before = clone(&target, true);
            merge(&target, &Value::from(source), false, deep);
            for (key, value) in before.own_entries() {
                if !matches!(value, Value::Object(_)) {
                    prop_assert_eq!(target.get(&key).unwrap(), value);
                }
            }
        }

        /// Property: a shallow overwriting merge leaves the target holding the
        /// source's first-level values
        #[test]
        fn shallow_overwrite_takes_source_values(target in arb_object(), source in arb_object()) {
            let target = Value::from(target);
            let source = Value::from(source);
            merge(&target, &source, true, false);
            for (key, value) in source.own_entries() {
                prop_assert!(target.get(&key).unwrap().strict_eq(&value));
            }
        }
    }

    // ============================================================================
    // index_of property tests
    // ============================================================================

    proptest! {
        /// Property: index_of finds the first position of a present element
        #[test]
        fn index_of_finds_first_occurrence(items in prop::collection::vec(0i64..5, 1..10), pick in 0usize..10) {
            let pick = pick % items.len();
            let needle = items[pick];
            let list = Value::array(items.iter().map(|n| Value::from(*n)).collect());
            let expected = items.iter().position(|n| *n == needle).unwrap() as isize;
            prop_assert_eq!(index_of(&list, &Value::from(needle)), expected);
        }

        /// Property: index_of reports -1 for an absent element
        #[test]
        fn index_of_absent_is_minus_one(items in prop::collection::vec(0i64..5, 0..10)) {
            let list = Value::array(items.into_iter().map(Value::from).collect());
            prop_assert_eq!(index_of(&list, &Value::from(99)), -1);
        }

        /// Property: index_of agrees with get on the index it returns
        #[test]
        fn index_of_result_points_at_needle(items in prop::collection::vec("[ab]{1,2}", 1..8)) {
            let list = Value::array(items.iter().map(|s| Value::from(s.as_str())).collect());
            let needle = Value::from(items[items.len() - 1].as_str());
            let index = index_of(&list, &needle);
            prop_assert!(index >= 0);
            prop_assert_eq!(list.get(&Key::Index(index as usize)).unwrap(), needle);
        }
    }
}
