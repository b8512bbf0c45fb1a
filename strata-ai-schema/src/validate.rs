//! Schema validation.

use std::collections::HashSet;

use strata_ai_core::{SchemaError, SchemaErrorKind};

use crate::node::{SchemaKind, SchemaNode};
use crate::path;

impl SchemaNode {
    /// Check the tree for definition errors.
    ///
    /// Fails on the first violation found, depth first, when:
    /// - a required field does not name a declared property
    /// - two sibling properties share a name
    /// - an object property has an empty name
    /// - an enum has no values, or repeats a value
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_node(self, "")
    }
}

fn validate_node(node: &SchemaNode, at: &str) -> Result<(), SchemaError> {
    match node.kind() {
        SchemaKind::String | SchemaKind::Number | SchemaKind::Boolean => Ok(()),
        SchemaKind::Array { items } => validate_node(items, &path::join(at, "items")),
        SchemaKind::Enum { values } => {
            if values.is_empty() {
                return Err(SchemaError::empty_enum(at));
            }
            let mut seen = HashSet::with_capacity(values.len());
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(SchemaError::new(
                        at,
                        SchemaErrorKind::DuplicateEnumValue {
                            value: value.clone(),
                        },
                    ));
                }
            }
            Ok(())
        }
        SchemaKind::Object {
            properties,
            required,
        } => {
            let mut names = HashSet::with_capacity(properties.len());
            for property in properties {
                if property.name().is_empty() {
                    return Err(SchemaError::new(at, SchemaErrorKind::EmptyName));
                }
                if !names.insert(property.name()) {
                    return Err(SchemaError::duplicate_name(at, property.name()));
                }
            }

            if let Some(field) = required.iter().find(|f| !names.contains(f.as_str())) {
                return Err(SchemaError::undeclared_required(at, field.as_str()));
            }

            for property in properties {
                validate_node(property, &path::join(at, property.name()))?;
            }
            Ok(())
        }
    }
}
