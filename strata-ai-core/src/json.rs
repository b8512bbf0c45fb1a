//! JSON helpers shared across crates.

use serde_json::{Map, Value};

/// Merge two JSON values, with `b` taking precedence.
///
/// Objects are merged key by key, recursively. Any other pair of values
/// resolves to `b`.
#[must_use]
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(a_obj), Value::Object(b_obj)) => {
            let mut result = a_obj.clone();
            merge_into(&mut result, b_obj);
            Value::Object(result)
        }
        (_, b) => b.clone(),
    }
}

/// Merge `overlay` into `base` in place, with `overlay` taking precedence.
pub fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (k, v) in overlay {
        let merged = match base.get(k) {
            Some(existing) => merge_json(existing, v),
            None => v.clone(),
        };
        base.insert(k.clone(), merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_merge_nested_objects() {
        let a = json!({"generationConfig": {"temperature": 0.2, "topK": 3}, "model": "x"});
        let b = json!({"generationConfig": {"temperature": 0.9}});
        assert_eq!(
            merge_json(&a, &b),
            json!({"generationConfig": {"temperature": 0.9, "topK": 3}, "model": "x"})
        );
    }

    #[test]
    fn test_merge_non_object_overrides() {
        assert_eq!(merge_json(&json!([1, 2]), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge_json(&json!({"a": 1}), &json!(null)), json!(null));
    }

    #[test]
    fn test_merge_into() {
        let mut base = json!({"a": {"b": 1}}).as_object().cloned().unwrap();
        let overlay = json!({"a": {"c": 2}, "d": true}).as_object().cloned().unwrap();
        merge_into(&mut base, &overlay);
        assert_eq!(Value::Object(base), json!({"a": {"b": 1, "c": 2}, "d": true}));
    }
}
