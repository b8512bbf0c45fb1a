//! Validation of a decoded value against a schema tree.

use serde_json::Value as JsonValue;
use strata_ai_schema::{path, SchemaKind, SchemaNode};

use crate::diagnostics::{json_type_name, Diagnostic};

/// Check `value` against `schema`, collecting every violation.
///
/// Types are checked strictly: `"42"` is not a number and `"true"` is not a
/// boolean. `null` is only accepted on nullable nodes. Fields the schema does
/// not declare are ignored.
#[must_use]
pub fn validate_value(value: &JsonValue, schema: &SchemaNode) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check(value, schema, "", &mut diagnostics);
    diagnostics
}

fn check(value: &JsonValue, node: &SchemaNode, at: &str, out: &mut Vec<Diagnostic>) {
    if value.is_null() {
        if !node.is_nullable() {
            out.push(Diagnostic::type_mismatch(at, node.type_name(), "null"));
        }
        return;
    }

    match node.kind() {
        SchemaKind::String => expect(value.is_string(), value, node, at, out),
        SchemaKind::Number => expect(value.is_number(), value, node, at, out),
        SchemaKind::Boolean => expect(value.is_boolean(), value, node, at, out),
        SchemaKind::Enum { values } => match value.as_str() {
            Some(s) if values.iter().any(|v| v == s) => {}
            Some(s) => out.push(Diagnostic::invalid_enum_value(at, s, values)),
            None => expect(false, value, node, at, out),
        },
        SchemaKind::Array { items } => match value.as_array() {
            Some(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    check(element, items, &path::join_index(at, i), out);
                }
            }
            None => expect(false, value, node, at, out),
        },
        SchemaKind::Object {
            properties,
            required,
        } => {
            let Some(map) = value.as_object() else {
                expect(false, value, node, at, out);
                return;
            };
            for property in properties {
                let child_path = path::join(at, property.name());
                match map.get(property.name()) {
                    Some(child) => check(child, property, &child_path, out),
                    None if required.contains(property.name()) => {
                        out.push(Diagnostic::missing_required_field(child_path, property.name()));
                    }
                    None => {}
                }
            }
        }
    }
}

fn expect(ok: bool, value: &JsonValue, node: &SchemaNode, at: &str, out: &mut Vec<Diagnostic>) {
    if !ok {
        out.push(Diagnostic::type_mismatch(
            at,
            node.type_name(),
            json_type_name(value),
        ));
    }
}
