//! Permissive traversal helpers for the backend's loosely shaped JSON.
//!
//! The upstream API has no stable contract: field presence varies between
//! responses and between bags within one response. Every helper here returns
//! an `Option` so callers degrade field-by-field instead of failing the whole
//! parse on a missing branch.

use serde_json::Value;

/// Child value under `key`, if `value` is an object containing it.
pub fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object()?.get(key)
}

/// Value at a nested key path, if every intermediate node is an object.
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| child(node, key))
}

/// Trimmed, non-empty string at a nested key path.
pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let text = at(value, path)?.as_str()?.trim();
    (!text.is_empty()).then_some(text)
}

/// First element of the array at a nested key path.
pub fn first_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    at(value, path)?.as_array()?.first()
}

/// Array at a nested key path.
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    at(value, path)?.as_array()
}

/// Integer at a nested key path, coerced from a string form if needed.
/// The backend serializes counters both ways.
pub fn int_at(value: &Value, path: &[&str]) -> Option<i64> {
    match at(value, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
