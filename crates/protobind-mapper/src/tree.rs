//! Inclusion filtering applied to JSON trees between serde and text.

use serde_json::Value;

use crate::config::Inclusion;

/// Drops object properties that `inclusion` excludes, at every depth.
///
/// A property is judged by its value as written, before its own children are
/// filtered, so an object whose properties are all dropped stays as `{}`.
/// Array elements are never dropped.
pub fn retain(tree: &mut Value, inclusion: Inclusion) {
    match inclusion {
        Inclusion::Always => {}
        Inclusion::NonNull => prune(tree, Value::is_null),
        Inclusion::NonDefault => prune(tree, is_default),
    }
}

fn prune(tree: &mut Value, excluded: fn(&Value) -> bool) {
    match tree {
        Value::Object(map) => {
            map.retain(|_, value| !excluded(value));
            for value in map.values_mut() {
                prune(value, excluded);
            }
        }
        Value::Array(items) => {
            for item in items {
                prune(item, excluded);
            }
        }
        _ => {}
    }
}

pub fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_null() {
        let mut tree = json!({"a": null, "b": 0, "c": {"d": null, "e": false}, "f": [null]});
        retain(&mut tree, Inclusion::NonNull);
        assert_eq!(tree, json!({"b": 0, "c": {"e": false}, "f": [null]}));
    }

    #[test]
    fn test_non_default() {
        let mut tree = json!({
            "id": "001",
            "cents": 0,
            "ratio": 0.0,
            "on": false,
            "tags": [],
            "meta": {},
            "inner": {"x": 0}
        });
        retain(&mut tree, Inclusion::NonDefault);
        assert_eq!(tree, json!({"id": "001", "inner": {}}));
    }

    #[test]
    fn test_always_keeps_everything() {
        let original = json!({"a": null, "b": [], "c": ""});
        let mut tree = original.clone();
        retain(&mut tree, Inclusion::Always);
        assert_eq!(tree, original);
    }
}
