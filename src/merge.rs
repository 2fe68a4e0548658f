//! Deep-structure utilities over JSON translation trees.
//!
//! Translation bundles are arbitrarily nested JSON objects with string leaves.
//! These helpers implement the structural comparison and the fallback merge
//! that the rest of the crate is built on: merging an incomplete translation
//! onto the base language fills in every key the translation is missing.

use serde_json::{Map, Value};

/// Check whether a value is a mapping (a JSON object).
///
/// Arrays and null are not mappings; they are treated as leaf values by both
/// [`deep_equal`] and [`deep_merge`].
pub fn is_mapping(value: &Value) -> bool {
    value.is_object()
}

/// Structural equality for translation trees.
///
/// Two mappings are equal iff they have the same key set (order-independent)
/// and every corresponding value is `deep_equal`. Anything that is not a
/// mapping is compared by plain value equality, so arrays are compared as
/// opaque leaves — an accepted limitation for translation data, where arrays
/// are rare and never merged.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a.as_object(), b.as_object()) {
        (Some(ma), Some(mb)) => {
            ma.len() == mb.len()
                && ma
                    .iter()
                    .all(|(key, va)| mb.get(key).is_some_and(|vb| deep_equal(va, vb)))
        }
        _ => a == b,
    }
}

/// Merge `override_tree` onto `base`, returning a new tree.
///
/// For every key in the override: if both sides hold mappings the merge
/// recurses; otherwise the override's value wins unless it is null, in which
/// case the base's value is kept. Keys present only in the base survive
/// untouched. This "override wins except when null" rule is the fallback
/// mechanism: incomplete translations inherit missing (or explicitly nulled)
/// keys from the base language.
///
/// If either side is not a mapping, the override is returned as-is unless it
/// is null, in which case the base is returned.
pub fn deep_merge(base: &Value, override_tree: &Value) -> Value {
    let (base_map, override_map) = match (base.as_object(), override_tree.as_object()) {
        (Some(b), Some(o)) => (b, o),
        _ => {
            return if override_tree.is_null() {
                base.clone()
            } else {
                override_tree.clone()
            };
        }
    };

    let mut out: Map<String, Value> = base_map.clone();
    for (key, override_value) in override_map {
        let replacement = match (out.get(key), override_value) {
            (Some(base_value), ov) if is_mapping(base_value) && is_mapping(ov) => {
                Some(deep_merge(base_value, ov))
            }
            // Null override inherits the base value (or stays absent).
            (_, Value::Null) => None,
            (_, ov) => Some(ov.clone()),
        };
        if let Some(value) = replacement {
            out.insert(key.clone(), value);
        }
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== is_mapping Tests ====================

    #[test]
    fn test_objects_are_mappings() {
        assert!(is_mapping(&json!({})));
        assert!(is_mapping(&json!({"a": 1})));
    }

    #[test]
    fn test_non_objects_are_not_mappings() {
        assert!(!is_mapping(&json!(null)));
        assert!(!is_mapping(&json!([1, 2, 3])));
        assert!(!is_mapping(&json!("hello")));
        assert!(!is_mapping(&json!(42)));
        assert!(!is_mapping(&json!(true)));
    }

    // ==================== deep_equal Tests ====================

    #[test]
    fn test_deep_equal_identical_nested() {
        let a = json!({"nav": {"home": "Home", "about": "About"}});
        let b = json!({"nav": {"about": "About", "home": "Home"}});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_detects_different_values() {
        let a = json!({"nav": {"home": "Home"}});
        let b = json!({"nav": {"home": "Accueil"}});
        assert!(!deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_detects_missing_keys() {
        let a = json!({"home": "Home", "about": "About"});
        let b = json!({"home": "Home"});
        assert!(!deep_equal(&a, &b));
        assert!(!deep_equal(&b, &a));
    }

    #[test]
    fn test_deep_equal_mapping_vs_leaf() {
        assert!(!deep_equal(&json!({"a": 1}), &json!("a")));
        assert!(!deep_equal(&json!("a"), &json!({"a": 1})));
    }

    #[test]
    fn test_deep_equal_primitives() {
        assert!(deep_equal(&json!("x"), &json!("x")));
        assert!(!deep_equal(&json!("x"), &json!("y")));
        assert!(deep_equal(&json!(null), &json!(null)));
    }

    // ==================== deep_merge Tests ====================

    #[test]
    fn test_merge_empty_override_is_identity() {
        let base = json!({"a": {"b": "X"}, "c": "Y"});
        let merged = deep_merge(&base, &json!({}));
        assert!(deep_equal(&merged, &base));
    }

    #[test]
    fn test_merge_fills_missing_keys_from_base() {
        let base = json!({"hello": "Hello", "bye": "Bye"});
        let partial = json!({"hello": "Salut"});
        let merged = deep_merge(&base, &partial);
        assert_eq!(merged, json!({"hello": "Salut", "bye": "Bye"}));
    }

    #[test]
    fn test_merge_recurses_into_nested_mappings() {
        let base = json!({"nav": {"home": "Home", "about": "About"}});
        let partial = json!({"nav": {"home": "Accueil"}});
        let merged = deep_merge(&base, &partial);
        assert_eq!(
            merged,
            json!({"nav": {"home": "Accueil", "about": "About"}})
        );
    }

    #[test]
    fn test_merge_null_override_keeps_base_value() {
        let base = json!({"hello": "Hello"});
        let nulled = json!({"hello": null});
        let merged = deep_merge(&base, &nulled);
        assert_eq!(merged, json!({"hello": "Hello"}));
    }

    #[test]
    fn test_merge_leaf_replaces_subtree() {
        let base = json!({"nav": {"home": "Home"}});
        let flat = json!({"nav": "everything"});
        let merged = deep_merge(&base, &flat);
        assert_eq!(merged, json!({"nav": "everything"}));
    }

    #[test]
    fn test_merge_subtree_replaces_leaf() {
        let base = json!({"nav": "everything"});
        let nested = json!({"nav": {"home": "Home"}});
        let merged = deep_merge(&base, &nested);
        assert_eq!(merged, json!({"nav": {"home": "Home"}}));
    }

    #[test]
    fn test_merge_non_mapping_base_returns_override() {
        assert_eq!(deep_merge(&json!("base"), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(deep_merge(&json!("base"), &json!(null)), json!("base"));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = json!({"a": "1"});
        let over = json!({"b": "2"});
        let _ = deep_merge(&base, &over);
        assert_eq!(base, json!({"a": "1"}));
        assert_eq!(over, json!({"b": "2"}));
    }

    // ==================== Property Tests ====================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Small recursive JSON trees: string leaves, nulls, and nested objects.
        fn arb_tree() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                "[a-z]{0,8}".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                proptest::collection::btree_map("[a-d]{1,2}", inner, 0..4).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                })
            })
        }

        proptest! {
            #[test]
            fn prop_deep_equal_reflexive(tree in arb_tree()) {
                prop_assert!(deep_equal(&tree, &tree));
            }

            #[test]
            fn prop_deep_equal_symmetric(a in arb_tree(), b in arb_tree()) {
                prop_assert_eq!(deep_equal(&a, &b), deep_equal(&b, &a));
            }

            #[test]
            fn prop_merge_empty_override_identity(tree in arb_tree()) {
                let merged = deep_merge(&tree, &Value::Object(Default::default()));
                if is_mapping(&tree) {
                    prop_assert!(deep_equal(&merged, &tree));
                }
            }

            #[test]
            fn prop_merge_preserves_unoverridden_base_keys(
                base in arb_tree(),
                over in arb_tree(),
            ) {
                let merged = deep_merge(&base, &over);
                if let (Some(base_map), Some(over_map)) = (base.as_object(), over.as_object()) {
                    let merged_map = merged.as_object().unwrap();
                    for (key, base_value) in base_map {
                        if !over_map.contains_key(key) {
                            prop_assert!(deep_equal(&merged_map[key], base_value));
                        }
                    }
                }
            }

            #[test]
            fn prop_merge_never_loses_null_overridden_keys(
                base in arb_tree(),
                over in arb_tree(),
            ) {
                // A null override must keep the base value, never erase the key.
                let merged = deep_merge(&base, &over);
                if let (Some(base_map), Some(over_map)) = (base.as_object(), over.as_object()) {
                    let merged_map = merged.as_object().unwrap();
                    for (key, over_value) in over_map {
                        if over_value.is_null() {
                            if let Some(base_value) = base_map.get(key) {
                                prop_assert!(deep_equal(&merged_map[key], base_value));
                            }
                        }
                    }
                }
            }
        }
    }
}
