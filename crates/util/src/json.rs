//! Typed-default accessors over JSON trees.
//!
//! Every accessor takes an optional node so callers can chain lookups without
//! unwrapping, and returns the supplied default whenever the node or field is
//! missing or the value cannot be coerced to the requested type.

use serde_json::{Map, Value};

/// Renders a scalar node as text.
///
/// Strings are returned as-is, numbers and booleans use their JSON text and `null`
/// becomes `"null"`. Arrays and objects have no text form and yield `""`.
///
/// # Examples
///
/// ```
/// use protobind_util::json::as_text;
/// use serde_json::json;
///
/// assert_eq!(as_text(&json!("abc")), "abc");
/// assert_eq!(as_text(&json!(12.5)), "12.5");
/// assert_eq!(as_text(&json!(null)), "null");
/// assert_eq!(as_text(&json!([1])), "");
/// ```
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn field<'a>(node: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    node?.as_object()?.get(name)
}

/// Returns the text of `node[name]`, or `default` when the field is absent.
pub fn field_as_text_or(node: Option<&Value>, name: &str, default: &str) -> String {
    match field(node, name) {
        Some(value) => as_text(value),
        None => default.to_string(),
    }
}

/// Returns the text of `node[name]`, or `None` when the field is absent.
pub fn field_as_text(node: Option<&Value>, name: &str) -> Option<String> {
    field(node, name).map(as_text)
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Returns `node[name]` coerced to `i32`, or `default`.
///
/// Integral numbers, fractional numbers (truncated), numeric strings and booleans
/// (`1`/`0`) coerce. Values outside the `i32` range yield `default`.
pub fn field_as_i32_or(node: Option<&Value>, name: &str, default: i32) -> i32 {
    field(node, name)
        .and_then(as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(default)
}

/// Returns `node[name]` coerced to `i64`, or `default`.
pub fn field_as_i64_or(node: Option<&Value>, name: &str, default: i64) -> i64 {
    field(node, name).and_then(as_i64).unwrap_or(default)
}

/// Returns `node[name]` coerced to `f64`, or `default`.
///
/// # Examples
///
/// ```
/// use protobind_util::json::field_as_f64_or;
/// use serde_json::json;
///
/// let doc = json!({"rate": 102.2, "label": "crap"});
/// assert_eq!(field_as_f64_or(Some(&doc), "rate", 0.0), 102.2);
/// assert_eq!(field_as_f64_or(Some(&doc), "label", 2.0), 2.0);
/// assert_eq!(field_as_f64_or(Some(&doc), "poof", 3.0), 3.0);
/// ```
pub fn field_as_f64_or(node: Option<&Value>, name: &str, default: f64) -> f64 {
    let coerced = match field(node, name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    coerced.unwrap_or(default)
}

/// Returns the string elements of the array `node[name]`.
///
/// - missing field or non-array value: `default`
/// - empty array: an empty list
/// - non-empty array without a single string element: `default`
/// - otherwise: the string elements, skipping the others
pub fn strings_field_or(node: Option<&Value>, name: &str, default: Vec<String>) -> Vec<String> {
    let Some(Value::Array(items)) = field(node, name) else {
        return default;
    };
    if items.is_empty() {
        return Vec::new();
    }
    let strings: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect();
    if strings.is_empty() {
        default
    } else {
        strings
    }
}

/// Builds an object from alternating keys and values.
///
/// A trailing key without a value is ignored.
///
/// # Examples
///
/// ```
/// use protobind_util::json::for_kv;
/// use serde_json::json;
///
/// assert_eq!(for_kv(&["k0", "v0", "k1", "v1", "k2"]), json!({"k0": "v0", "k1": "v1"}));
/// ```
pub fn for_kv(kv: &[&str]) -> Value {
    let mut map = Map::new();
    for pair in kv.chunks_exact(2) {
        map.insert(pair[0].to_string(), Value::String(pair[1].to_string()));
    }
    Value::Object(map)
}
