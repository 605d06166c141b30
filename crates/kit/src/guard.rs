//! Predicates over dynamic JSON values

use serde_json::Value;

/// True if the value is absent or `null`
///
/// A missing field and an explicit `null` both mean "no value".
pub fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// True for strings that are empty after trimming whitespace
pub fn is_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

/// True for strings with at least one non-whitespace character
pub fn is_non_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// True for numbers without a fractional part, including `2.0`
pub fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().is_some_and(|f| f.fract() == 0.0),
        Value::Number(_) => true,
        _ => false,
    }
}

/// True for numbers with a fractional part
pub fn is_float(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|f| value.is_f64() && f.fract() != 0.0)
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

pub fn is_true(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

pub fn is_false(value: &Value) -> bool {
    matches!(value, Value::Bool(false))
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

pub fn is_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

pub fn is_non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}

/// True for non-empty arrays made only of strings
pub fn is_string_array(value: &Value) -> bool {
    is_non_empty_array(value) && value.as_array().is_some_and(|items| items.iter().all(Value::is_string))
}

pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}

/// True for `null`, `[]`, `{}` and blank strings
pub fn is_empty(value: &Value) -> bool {
    is_null(value) || is_empty_array(value) || is_empty_object(value) || is_empty_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nil() {
        assert!(is_nil(None));
        assert!(is_nil(Some(&Value::Null)));
        assert!(!is_nil(Some(&json!(0))));
        assert!(!is_nil(Some(&json!(""))));
        assert!(!is_nil(Some(&json!(false))));
    }

    #[test]
    fn test_strings() {
        assert!(is_string(&json!("a")));
        assert!(is_empty_string(&json!("   ")));
        assert!(!is_empty_string(&json!(" a ")));
        assert!(is_non_empty_string(&json!(" a ")));
        assert!(!is_non_empty_string(&json!(1)));
    }

    #[test]
    fn test_numbers() {
        assert!(is_number(&json!(1)));
        assert!(is_int(&json!(-3)));
        assert!(is_int(&json!(2.0)));
        assert!(!is_int(&json!(2.5)));
        assert!(is_float(&json!(2.5)));
        assert!(!is_float(&json!(2)));
        assert!(!is_number(&json!("1")));
    }

    #[test]
    fn test_booleans() {
        assert!(is_true(&json!(true)));
        assert!(is_false(&json!(false)));
        assert!(is_boolean(&json!(false)));
        assert!(!is_boolean(&json!(0)));
    }

    #[test]
    fn test_collections() {
        assert!(is_array(&json!([])));
        assert!(is_empty_array(&json!([])));
        assert!(is_non_empty_array(&json!([1])));
        assert!(is_string_array(&json!(["a", "b"])));
        assert!(!is_string_array(&json!(["a", 1])));
        assert!(!is_string_array(&json!([])));
        assert!(is_object(&json!({})));
        assert!(is_empty_object(&json!({})));
        assert!(!is_empty_object(&json!({"a": 1})));
    }

    #[test]
    fn test_empty() {
        for value in [json!(null), json!([]), json!({}), json!(" ")] {
            assert!(is_empty(&value), "{value} should be empty");
        }
        for value in [json!(0), json!([0]), json!({"a": null}), json!("x"), json!(false)] {
            assert!(!is_empty(&value), "{value} should not be empty");
        }
    }
}
