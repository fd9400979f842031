//! Example values synthesized from schemas.
//!
//! Two policies share one traversal:
//!
//! - **literal** ([`synthesize_default`]): the value a client would send if it
//!   accepted every default. Used for command bodies.
//! - **contextual** ([`synthesize_example`]): the *shape* of a payload in one
//!   direction. Strings render as `"string"`, arrays hold one item, and
//!   `readOnly`/`writeOnly` properties are dropped for requests/responses.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parse::components::Components;
use crate::parse::ref_resolve::resolve;
use crate::parse::schema::{Schema, SchemaNode, SchemaOrRef};

/// Placeholder emitted for every string in contextual mode.
pub const STRING_PLACEHOLDER: &str = "string";

/// Direction a contextual example is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleContext {
    /// Request body: `readOnly` properties are excluded.
    #[default]
    Request,
    /// Response body: `writeOnly` properties are excluded.
    Response,
    /// Every property is included.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Literal,
    Contextual(ExampleContext),
}

/// Literal-default value of `schema`: `default`, then `example`, then the
/// first `enum` value, then a zero value for the type. Objects recurse into
/// every declared property; arrays are empty.
///
/// Returns `None` when the schema carries no type and no hint.
pub fn synthesize_default(schema: &SchemaOrRef, components: &Components) -> Option<Value> {
    Synthesizer::new(components, Mode::Literal).value_of(schema)
}

/// Contextual example of `schema` for the given direction.
pub fn synthesize_example(
    schema: &SchemaOrRef,
    components: &Components,
    context: ExampleContext,
) -> Option<Value> {
    Synthesizer::new(components, Mode::Contextual(context)).value_of(schema)
}

/// [`synthesize_example`] pretty-printed with 2-space indentation.
pub fn example_json(
    schema: &SchemaOrRef,
    components: &Components,
    context: ExampleContext,
) -> Option<String> {
    let value = synthesize_example(schema, components, context)?;
    serde_json::to_string_pretty(&value).ok()
}

/// One synthesis pass. `visited` holds the component names open on the
/// current recursion path; re-entering one yields a shallow placeholder.
struct Synthesizer<'a> {
    components: &'a Components,
    mode: Mode,
    visited: HashSet<&'a str>,
}

impl<'a> Synthesizer<'a> {
    fn new(components: &'a Components, mode: Mode) -> Self {
        Self {
            components,
            mode,
            visited: HashSet::new(),
        }
    }

    fn value_of(&mut self, schema: &'a SchemaOrRef) -> Option<Value> {
        let node = schema.node();
        if let Some(hint) = self.hint(node) {
            return Some(hint);
        }
        match node {
            SchemaNode::Reference(ref_path) => self.follow(ref_path),
            SchemaNode::Array(schema) => Some(self.array_value(schema)),
            SchemaNode::Object(schema) => Some(self.object_value(schema)),
            leaf => self.leaf_value(leaf),
        }
    }

    fn follow(&mut self, ref_path: &str) -> Option<Value> {
        let resolved = resolve(ref_path, self.components)?;
        if !self.visited.insert(resolved.name) {
            log::debug!("cycle through {ref_path}, emitting placeholder");
            return self.placeholder(resolved.schema);
        }
        let value = self.value_of(resolved.schema);
        self.visited.remove(resolved.name);
        value
    }

    /// Explicit value carried by the node itself. Contextual strings ignore
    /// it and always show the placeholder.
    fn hint(&self, node: SchemaNode<'a>) -> Option<Value> {
        if matches!(
            (self.mode, node),
            (Mode::Contextual(_), SchemaNode::String(_))
        ) {
            return None;
        }
        let schema = node.schema()?;
        schema
            .default_value
            .clone()
            .or_else(|| schema.example.clone())
            .or_else(|| schema.enum_values.first().cloned())
    }

    fn leaf_value(&self, node: SchemaNode<'a>) -> Option<Value> {
        match node {
            SchemaNode::String(_) => Some(match self.mode {
                Mode::Literal => Value::String(String::new()),
                Mode::Contextual(_) => Value::String(STRING_PLACEHOLDER.to_string()),
            }),
            SchemaNode::Number(_) | SchemaNode::Integer(_) => Some(Value::from(0)),
            SchemaNode::Boolean(_) => Some(Value::Bool(false)),
            SchemaNode::Array(_) => Some(Value::Array(Vec::new())),
            SchemaNode::Object(_) => Some(Value::Object(Map::new())),
            SchemaNode::Reference(_) | SchemaNode::Unknown(_) => None,
        }
    }

    /// Value for a schema reached again through a cycle: its hint or its
    /// type's zero value, without descending.
    fn placeholder(&self, schema: &'a SchemaOrRef) -> Option<Value> {
        let node = schema.node();
        self.hint(node).or_else(|| self.leaf_value(node))
    }

    fn array_value(&mut self, schema: &'a Schema) -> Value {
        match self.mode {
            Mode::Literal => Value::Array(Vec::new()),
            Mode::Contextual(_) => Value::Array(
                schema
                    .items
                    .as_deref()
                    .and_then(|items| self.value_of(items))
                    .into_iter()
                    .collect(),
            ),
        }
    }

    fn object_value(&mut self, schema: &'a Schema) -> Value {
        let mut object = Map::new();
        for (name, property) in &schema.properties {
            if !self.is_visible(property) {
                continue;
            }
            if let Some(value) = self.value_of(property) {
                object.insert(name.clone(), value);
            }
        }
        Value::Object(object)
    }

    /// Whether a property survives the direction filter. Flags are read on
    /// the property itself, or on its target when it is a reference.
    fn is_visible(&self, property: &SchemaOrRef) -> bool {
        let Mode::Contextual(context) = self.mode else {
            return true;
        };
        let flags = match property {
            SchemaOrRef::Schema(schema) => Some(&**schema),
            SchemaOrRef::Ref { ref_path } => {
                resolve(ref_path, self.components).and_then(|r| r.schema.as_schema())
            }
        };
        let Some(flags) = flags else {
            return true;
        };
        match context {
            ExampleContext::Request => !flags.is_read_only(),
            ExampleContext::Response => !flags.is_write_only(),
            ExampleContext::Neutral => true,
        }
    }
}
