//! Schema tree nodes and builders.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The type-specific part of a [`SchemaNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array whose elements all match `items`.
    Array {
        /// Element schema.
        items: Box<SchemaNode>,
    },
    /// A JSON object.
    Object {
        /// Declared properties, in declaration order.
        #[serde(default)]
        properties: Vec<SchemaNode>,
        /// Names of properties that must be present.
        #[serde(default)]
        required: IndexSet<String>,
    },
    /// A string restricted to a fixed set of values.
    Enum {
        /// Allowed values, in declaration order.
        values: Vec<String>,
    },
}

/// One node of the tree describing the desired output shape.
///
/// Nodes own their children, so a tree can never contain a cycle. Equality
/// is structural; the required-field set of an object compares as a set.
///
/// # Example
///
/// ```rust
/// use strata_ai_schema::{ObjectSchema, SchemaNode};
///
/// let review = ObjectSchema::new("movie_review", "A structured movie review")
///     .property(SchemaNode::string("title", "The movie title"), true)
///     .property(SchemaNode::number("rating", "Rating out of 10"), true)
///     .property(SchemaNode::string("summary", "Brief review summary"), true)
///     .build();
///
/// assert!(review.validate().is_ok());
/// assert_eq!(review.properties().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    nullable: bool,
    #[serde(flatten)]
    kind: SchemaKind,
}

impl SchemaNode {
    /// Create a node from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            nullable: false,
            kind,
        }
    }

    /// Create a string node.
    #[must_use]
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, SchemaKind::String)
    }

    /// Create a number node.
    #[must_use]
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, SchemaKind::Number)
    }

    /// Create a boolean node.
    #[must_use]
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, SchemaKind::Boolean)
    }

    /// Create an array node.
    #[must_use]
    pub fn array(
        name: impl Into<String>,
        description: impl Into<String>,
        items: SchemaNode,
    ) -> Self {
        Self::new(
            name,
            description,
            SchemaKind::Array {
                items: Box::new(items),
            },
        )
    }

    /// Create an enum node.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, description: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            description,
            SchemaKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Start building an object node.
    #[must_use]
    pub fn object(name: impl Into<String>, description: impl Into<String>) -> ObjectSchema {
        ObjectSchema::new(name, description)
    }

    /// Allow this node to be `null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `null` is accepted in place of a value.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The type-specific part of the node.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// JSON type name of the node (`"string"`, `"object"`, ...).
    ///
    /// Enums report `"string"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::String | SchemaKind::Enum { .. } => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Object { .. } => "object",
        }
    }

    /// Whether this is an object node.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }

    /// Object properties; empty for every other kind.
    #[must_use]
    pub fn properties(&self) -> &[SchemaNode] {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties,
            _ => &[],
        }
    }

    /// Look up an object property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties().iter().find(|p| p.name == name)
    }

    /// Required field names of an object node.
    #[must_use]
    pub fn required_fields(&self) -> Option<&IndexSet<String>> {
        match &self.kind {
            SchemaKind::Object { required, .. } => Some(required),
            _ => None,
        }
    }

    /// Whether `name` is a required field of this object node.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required_fields()
            .is_some_and(|required| required.contains(name))
    }

    /// Element schema of an array node.
    #[must_use]
    pub fn items(&self) -> Option<&SchemaNode> {
        match &self.kind {
            SchemaKind::Array { items } => Some(items),
            _ => None,
        }
    }

    /// Allowed values of an enum node.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.kind {
            SchemaKind::Enum { values } => Some(values),
            _ => None,
        }
    }

    /// Nesting depth of the tree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let children = match &self.kind {
            SchemaKind::Object { properties, .. } => {
                properties.iter().map(SchemaNode::depth).max().unwrap_or(0)
            }
            SchemaKind::Array { items } => items.depth(),
            _ => 0,
        };
        1 + children
    }
}

/// Builder for object nodes.
///
/// Each property is added together with its "required" flag, which is
/// recorded in the object's required-field set.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    name: String,
    description: String,
    nullable: bool,
    properties: Vec<SchemaNode>,
    required: IndexSet<String>,
}

impl ObjectSchema {
    /// Create a new object builder.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add a property.
    #[must_use]
    pub fn property(mut self, node: impl Into<SchemaNode>, required: bool) -> Self {
        let node = node.into();
        if required {
            self.required.insert(node.name.clone());
        }
        self.properties.push(node);
        self
    }

    /// Add a required property.
    #[must_use]
    pub fn required_property(self, node: impl Into<SchemaNode>) -> Self {
        self.property(node, true)
    }

    /// Add an optional property.
    #[must_use]
    pub fn optional_property(self, node: impl Into<SchemaNode>) -> Self {
        self.property(node, false)
    }

    /// Mark a field as required by name.
    ///
    /// The name is not checked here; [`SchemaNode::validate`] rejects
    /// names that do not match a property.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Allow the object to be `null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Finish the object node.
    #[must_use]
    pub fn build(self) -> SchemaNode {
        SchemaNode {
            name: self.name,
            description: self.description,
            nullable: self.nullable,
            kind: SchemaKind::Object {
                properties: self.properties,
                required: self.required,
            },
        }
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(builder: ObjectSchema) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie_review() -> SchemaNode {
        ObjectSchema::new("movie_review", "A structured movie review")
            .required_property(SchemaNode::string("title", "The movie title"))
            .required_property(SchemaNode::number("rating", "Rating out of 10"))
            .optional_property(SchemaNode::boolean("spoilers", "Contains spoilers"))
            .optional_property(SchemaNode::array(
                "cast",
                "Main cast",
                ObjectSchema::new("member", "")
                    .required_property(SchemaNode::string("name", ""))
                    .build(),
            ))
            .build()
    }

    #[test]
    fn test_object_builder_records_required() {
        let schema = movie_review();
        assert!(schema.is_object());
        assert!(schema.is_required("title"));
        assert!(schema.is_required("rating"));
        assert!(!schema.is_required("spoilers"));
        assert_eq!(schema.required_fields().map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_accessors() {
        let schema = movie_review();
        assert_eq!(schema.name(), "movie_review");
        assert_eq!(schema.type_name(), "object");
        assert_eq!(schema.property("rating").map(SchemaNode::type_name), Some("number"));
        assert!(schema.property("missing").is_none());

        let cast = schema.property("cast").unwrap();
        assert_eq!(cast.items().map(SchemaNode::name), Some("member"));
        assert!(cast.properties().is_empty());
        assert!(cast.required_fields().is_none());
    }

    #[test]
    fn test_depth() {
        assert_eq!(SchemaNode::string("a", "").depth(), 1);
        // object -> array -> object -> string
        assert_eq!(movie_review().depth(), 4);
    }

    #[test]
    fn test_enum_and_nullable() {
        let genre = SchemaNode::enumeration("genre", "Genre", ["drama", "sci-fi"]).nullable();
        assert!(genre.is_nullable());
        assert_eq!(genre.type_name(), "string");
        assert_eq!(
            genre.enum_values(),
            Some(&["drama".to_string(), "sci-fi".to_string()][..])
        );
    }

    #[test]
    fn test_structural_equality_ignores_required_order() {
        let a = ObjectSchema::new("o", "")
            .property(SchemaNode::string("x", ""), false)
            .property(SchemaNode::string("y", ""), false)
            .require("x")
            .require("y")
            .build();
        let b = ObjectSchema::new("o", "")
            .property(SchemaNode::string("x", ""), false)
            .property(SchemaNode::string("y", ""), false)
            .require("y")
            .require("x")
            .build();
        assert_eq!(a, b);
        assert_ne!(a, movie_review());
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = movie_review();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"][0]["name"], "title");
        assert_eq!(json["properties"][0]["type"], "string");

        let parsed: SchemaNode = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, schema);
    }
}
