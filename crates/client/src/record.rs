//! Flat output records
//!
//! Every result produced by the adapter is a flat mapping from a
//! descriptive field name to a scalar value. Diagnostic records are the
//! one exception: they may carry a raw upstream payload for inspection.

use serde_json::{Map, Value};

/// A single flat output record
pub type Record = Map<String, Value>;

/// Read a field out of an upstream JSON object.
///
/// Missing fields map to `Value::Null` rather than being omitted, so the
/// mapped records always carry the full set of descriptive keys.
#[must_use]
pub fn field(source: &Value, key: &str) -> Value {
    source.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_present() {
        let source = json!({ "cl": 1273 });
        assert_eq!(field(&source, "cl"), json!(1273));
    }

    #[test]
    fn test_field_missing_is_null() {
        let source = json!({ "cl": 1273 });
        assert_eq!(field(&source, "lt"), Value::Null);
    }

    #[test]
    fn test_field_on_non_object() {
        assert_eq!(field(&json!([1, 2]), "cl"), Value::Null);
    }
}
