//! Deep merge of JSON values.

use serde_json::Value;

/// Merges `source` into `target` and returns the result.
///
/// - two arrays are concatenated, target first;
/// - an object source is merged key by key into the target when the target is
///   an object too (otherwise into an empty object); nested objects and arrays
///   merge recursively;
/// - anything else is replaced by a copy of `source`.
pub fn deep_merge(target: Option<&Value>, source: &Value) -> Value {
    match (target, source) {
        (Some(Value::Array(left)), Value::Array(right)) => {
            Value::Array(left.iter().chain(right).cloned().collect())
        }
        (target, Value::Object(fields)) => {
            let mut merged = match target {
                Some(Value::Object(existing)) => existing.clone(),
                _ => serde_json::Map::new(),
            };
            for (key, value) in fields {
                let next = if is_mergeable(value) {
                    deep_merge(merged.get(key), value)
                } else {
                    value.clone()
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, other) => other.clone(),
    }
}

fn is_mergeable(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
