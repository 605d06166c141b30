//! Deep merge and omit over JSON values

use serde_json::{Map, Value};

/// Deep merge `source` over `target`, returning a new value
///
/// When both sides hold an object under the same key the objects are merged
/// recursively; otherwise the source value replaces the target value. Arrays
/// are replaced, not concatenated.
pub fn merge(target: &Value, source: &Value) -> Value {
    let mut merged = target.clone();
    merge_into(&mut merged, source);
    merged
}

/// Deep merge `source` into `target` in place
pub fn merge_into(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                let nested = value.is_object() && target.get(key).is_some_and(Value::is_object);
                if let Some(existing) = target.get_mut(key).filter(|_| nested) {
                    merge_into(existing, value);
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Merge every value left to right, starting from an empty object
pub fn merge_all<'a, I>(values: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut merged = Value::Object(Map::new());
    for value in values {
        merge_into(&mut merged, value);
    }
    merged
}

/// Copy of an object without the listed top-level keys
///
/// Non-object values are returned unchanged.
pub fn omit(value: &Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !keys.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
