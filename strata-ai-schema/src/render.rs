//! Provider-neutral JSON Schema rendering.

use serde_json::{json, Map, Value};

use crate::node::{SchemaKind, SchemaNode};

impl SchemaNode {
    /// Render the tree as a JSON Schema document.
    ///
    /// Objects always carry `properties` and `required`, both in declaration
    /// order, so the output is deterministic. Nullable nodes render their
    /// type as `["<type>", "null"]`; providers with a different convention
    /// rewrite this in their adapter.
    ///
    /// ```rust
    /// use strata_ai_schema::SchemaNode;
    ///
    /// let schema = SchemaNode::string("title", "The movie title").to_json_schema();
    /// assert_eq!(schema["type"], "string");
    /// assert_eq!(schema["description"], "The movie title");
    /// ```
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut out = Map::new();

        let type_name = self.type_name();
        let type_value = if self.is_nullable() {
            json!([type_name, "null"])
        } else {
            json!(type_name)
        };
        out.insert("type".to_string(), type_value);

        if !self.description().is_empty() {
            out.insert("description".to_string(), json!(self.description()));
        }

        match self.kind() {
            SchemaKind::String | SchemaKind::Number | SchemaKind::Boolean => {}
            SchemaKind::Array { items } => {
                out.insert("items".to_string(), items.to_json_schema());
            }
            SchemaKind::Enum { values } => {
                let mut allowed: Vec<Value> = values.iter().map(|v| json!(v)).collect();
                if self.is_nullable() {
                    allowed.push(Value::Null);
                }
                out.insert("enum".to_string(), Value::Array(allowed));
            }
            SchemaKind::Object { properties, .. } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|p| (p.name().to_string(), p.to_json_schema()))
                    .collect();
                // Declaration order, not insertion order of the required set.
                let required: Vec<Value> = properties
                    .iter()
                    .filter(|p| self.is_required(p.name()))
                    .map(|p| json!(p.name()))
                    .collect();
                out.insert("properties".to_string(), Value::Object(props));
                out.insert("required".to_string(), Value::Array(required));
            }
        }

        Value::Object(out)
    }
}
