//! Coercions over dynamic template values.

use serde_json::Value;

/// Whether a template value is falsy.
///
/// `null`, `false`, zero, NaN and the empty string are falsy. Sequences and
/// objects never are.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Elements of a value read as a sequence.
///
/// Falsy values give no elements, sequences give their own, anything else
/// gives itself.
pub fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        falsy if is_falsy(&falsy) => Vec::new(),
        other => vec![other],
    }
}

/// Wrap a value in a sequence, as [`into_items`] reads it.
pub fn array(value: &Value) -> Value {
    Value::Array(into_items(value.clone()))
}

/// Tag names of a value read as a sequence.
///
/// Numbers and booleans keep their text form. Nulls, objects and nested
/// sequences are not tags and are dropped.
pub fn tag_names(value: Value) -> Vec<String> {
    into_items(value)
        .into_iter()
        .filter_map(|item| match item {
            Value::String(tag) => Some(tag),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_falsy(&value), "{value}");
        }
        for value in [json!(true), json!(1), json!("a"), json!([]), json!({})] {
            assert!(!is_falsy(&value), "{value}");
        }
    }

    #[test]
    fn test_into_items() {
        assert_eq!(into_items(json!(["a", "b"])), vec![json!("a"), json!("b")]);
        assert_eq!(into_items(json!(null)), Vec::<Value>::new());
        assert_eq!(into_items(json!(7)), vec![json!(7)]);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_names(json!("rust")), vec!["rust"]);
        assert_eq!(tag_names(json!(5)), vec!["5"]);
        assert_eq!(tag_names(json!(["a", 2, null, {"x": 1}])), vec!["a", "2"]);
        assert!(tag_names(json!("")).is_empty());
    }
}
