//! Typed access to a coerced value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::diagnostics::json_type_name;
use crate::error::{OutputError, OutputResult};

/// A JSON value that passed validation against the schema.
///
/// Field lookups return [`OutputError::MissingRequiredField`] for absent
/// fields instead of a silent `null`.
///
/// # Example
///
/// ```rust
/// use strata_ai_output::StructuredObject;
///
/// let review = StructuredObject::new(serde_json::json!({
///     "title": "Inception",
///     "rating": 9.0,
/// }));
///
/// assert_eq!(review.str_field("title").unwrap(), "Inception");
/// assert_eq!(review.number_field("rating").unwrap(), 9.0);
/// assert!(review.field("summary").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StructuredObject {
    value: JsonValue,
}

impl StructuredObject {
    /// Wrap a value.
    #[must_use]
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Get a field that must be present.
    pub fn field(&self, name: &str) -> OutputResult<&JsonValue> {
        self.get(name)
            .ok_or_else(|| OutputError::missing_field(name))
    }

    /// Get a field that may be absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.value.as_object().and_then(|map| map.get(name))
    }

    /// Whether the field is present.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get a string field.
    pub fn str_field(&self, name: &str) -> OutputResult<&str> {
        let value = self.field(name)?;
        value
            .as_str()
            .ok_or_else(|| OutputError::type_mismatch(name, "string", json_type_name(value)))
    }

    /// Get a number field.
    pub fn number_field(&self, name: &str) -> OutputResult<f64> {
        let value = self.field(name)?;
        value
            .as_f64()
            .ok_or_else(|| OutputError::type_mismatch(name, "number", json_type_name(value)))
    }

    /// Get a boolean field.
    pub fn bool_field(&self, name: &str) -> OutputResult<bool> {
        let value = self.field(name)?;
        value
            .as_bool()
            .ok_or_else(|| OutputError::type_mismatch(name, "boolean", json_type_name(value)))
    }

    /// Get an array field.
    pub fn array_field(&self, name: &str) -> OutputResult<&[JsonValue]> {
        let value = self.field(name)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| OutputError::type_mismatch(name, "array", json_type_name(value)))
    }

    /// Get a nested object field.
    pub fn object_field(&self, name: &str) -> OutputResult<StructuredObject> {
        let value = self.field(name)?;
        if value.is_object() {
            Ok(StructuredObject::new(value.clone()))
        } else {
            Err(OutputError::type_mismatch(name, "object", json_type_name(value)))
        }
    }

    /// Deserialize the whole value into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> OutputResult<T> {
        T::deserialize(&self.value).map_err(OutputError::from)
    }

    /// The underlying value.
    #[must_use]
    pub fn as_value(&self) -> &JsonValue {
        &self.value
    }

    /// Consume and return the underlying value.
    #[must_use]
    pub fn into_value(self) -> JsonValue {
        self.value
    }
}

impl From<StructuredObject> for JsonValue {
    fn from(object: StructuredObject) -> Self {
        object.value
    }
}
