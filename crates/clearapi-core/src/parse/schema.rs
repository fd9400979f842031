use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ref_resolve::ref_name;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Any type name this crate does not interpret (e.g. Swagger's `file`).
    #[serde(other)]
    Other,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// A JSON Schema object, restricted to the keywords clearapi interprets.
/// Unknown keywords are accepted and dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Read/Write only
    #[serde(rename = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(rename = "writeOnly", skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
}

/// Typed view of a schema node. Every traversal in this crate dispatches on
/// this instead of probing which keywords happen to be present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// A `$ref` pointer, carrying the raw reference string.
    Reference(&'a str),
    String(&'a Schema),
    Number(&'a Schema),
    Integer(&'a Schema),
    Boolean(&'a Schema),
    Array(&'a Schema),
    Object(&'a Schema),
    /// No usable `type` and no structural hint.
    Unknown(&'a Schema),
}

impl SchemaOrRef {
    /// Classify this node.
    pub fn node(&self) -> SchemaNode<'_> {
        match self {
            SchemaOrRef::Ref { ref_path } => SchemaNode::Reference(ref_path),
            SchemaOrRef::Schema(schema) => schema.node(),
        }
    }

    /// The inline schema, if this is not a reference.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema),
            SchemaOrRef::Ref { .. } => None,
        }
    }
}

impl Schema {
    /// Classify this schema. An explicit `type` wins (for the list form, the
    /// first non-`null` entry); without one, `properties` implies an object
    /// and `items` implies an array.
    pub fn node(&self) -> SchemaNode<'_> {
        match self.primary_type() {
            Some(SchemaType::String) => SchemaNode::String(self),
            Some(SchemaType::Number) => SchemaNode::Number(self),
            Some(SchemaType::Integer) => SchemaNode::Integer(self),
            Some(SchemaType::Boolean) => SchemaNode::Boolean(self),
            Some(SchemaType::Array) => SchemaNode::Array(self),
            Some(SchemaType::Object) => SchemaNode::Object(self),
            Some(SchemaType::Null | SchemaType::Other) => SchemaNode::Unknown(self),
            None if !self.properties.is_empty() => SchemaNode::Object(self),
            None if self.items.is_some() => SchemaNode::Array(self),
            None => SchemaNode::Unknown(self),
        }
    }

    fn primary_type(&self) -> Option<&SchemaType> {
        match self.schema_type.as_ref()? {
            TypeSet::Single(t) => Some(t),
            TypeSet::Multiple(types) => types
                .iter()
                .find(|t| **t != SchemaType::Null)
                .or_else(|| types.first()),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }

    pub fn is_write_only(&self) -> bool {
        self.write_only.unwrap_or(false)
    }

    /// Whether `name` is listed in this schema's own `required` set.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl<'a> SchemaNode<'a> {
    /// The inline schema behind this node; `None` for references.
    pub fn schema(&self) -> Option<&'a Schema> {
        match *self {
            SchemaNode::Reference(_) => None,
            SchemaNode::String(s)
            | SchemaNode::Number(s)
            | SchemaNode::Integer(s)
            | SchemaNode::Boolean(s)
            | SchemaNode::Array(s)
            | SchemaNode::Object(s)
            | SchemaNode::Unknown(s) => Some(s),
        }
    }

    /// Short human-readable type, e.g. `string`, `Pet`, `Tag[]`.
    pub fn type_label(&self) -> String {
        match *self {
            SchemaNode::Reference(ref_path) => ref_name(ref_path).to_string(),
            SchemaNode::String(s) => match s.format.as_deref() {
                Some(format) => format!("string<{format}>"),
                None => "string".to_string(),
            },
            SchemaNode::Number(_) => "number".to_string(),
            SchemaNode::Integer(_) => "integer".to_string(),
            SchemaNode::Boolean(_) => "boolean".to_string(),
            SchemaNode::Array(s) => match s.items.as_deref() {
                Some(items) => format!("{}[]", items.node().type_label()),
                None => "array".to_string(),
            },
            SchemaNode::Object(_) => "object".to_string(),
            SchemaNode::Unknown(_) => "any".to_string(),
        }
    }
}
