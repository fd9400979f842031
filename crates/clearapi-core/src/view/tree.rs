//! Expandable schema trees.
//!
//! A property "hides" a nested schema when it is a reference, an object with
//! properties, or an array of either. [`child_schema`] opens exactly one
//! level; [`expand_all`] opens everything for non-interactive output.

use std::collections::HashSet;

use serde::Serialize;

use crate::parse::components::Components;
use crate::parse::ref_resolve::{resolve, schema_ref};
use crate::parse::schema::{Schema, SchemaNode, SchemaOrRef};

/// One opened level of a schema tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeNode<'a> {
    /// Component name, when the level was reached through a reference.
    pub name: Option<&'a str>,
    pub schema: &'a Schema,
}

impl<'a> TreeNode<'a> {
    /// Mandatory property names of this level. Only this set governs the
    /// markers shown for this level's properties.
    pub fn required(&self) -> &'a [String] {
        &self.schema.required
    }
}

/// A property as displayed inside its parent level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub type_label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub write_only: bool,
    #[serde(skip)]
    pub expandable: bool,
}

/// Whether `value` hides a nested schema that can be opened.
pub fn is_expandable(value: &SchemaOrRef) -> bool {
    match value.node() {
        SchemaNode::Reference(_) => true,
        SchemaNode::Object(schema) => !schema.properties.is_empty(),
        SchemaNode::Array(schema) => schema.items.as_deref().is_some_and(|items| {
            match items.node() {
                SchemaNode::Reference(_) => true,
                SchemaNode::Object(inner) => !inner.properties.is_empty(),
                _ => false,
            }
        }),
        _ => false,
    }
}

/// The schema opened by expanding `value`, or `None` when it is not
/// expandable or its reference does not resolve.
pub fn child_schema<'a>(value: &'a SchemaOrRef, components: &'a Components) -> Option<TreeNode<'a>> {
    match value.node() {
        SchemaNode::Reference(ref_path) => resolve_node(ref_path, components),
        SchemaNode::Object(schema) if !schema.properties.is_empty() => {
            Some(TreeNode { name: None, schema })
        }
        SchemaNode::Array(schema) => {
            let items = schema.items.as_deref()?;
            match items.node() {
                SchemaNode::Reference(ref_path) => resolve_node(ref_path, components),
                SchemaNode::Object(inner) if !inner.properties.is_empty() => Some(TreeNode {
                    name: None,
                    schema: inner,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Root level for a body or response schema: its expansion when it has one,
/// otherwise the inline schema itself.
pub fn root_node<'a>(value: &'a SchemaOrRef, components: &'a Components) -> Option<TreeNode<'a>> {
    child_schema(value, components).or_else(|| {
        value
            .as_schema()
            .map(|schema| TreeNode { name: None, schema })
    })
}

/// Root level for a component schema by name.
pub fn component_node<'a>(name: &str, components: &'a Components) -> Option<TreeNode<'a>> {
    resolve_node(&schema_ref(name), components)
}

/// Resolve a reference to an inline schema, following reference chains.
fn resolve_node<'a>(ref_path: &str, components: &'a Components) -> Option<TreeNode<'a>> {
    let mut seen = HashSet::new();
    let mut current = resolve(ref_path, components)?;
    loop {
        if !seen.insert(current.name) {
            log::debug!("reference chain through {} loops", current.name);
            return None;
        }
        match current.schema {
            SchemaOrRef::Schema(schema) => {
                return Some(TreeNode {
                    name: Some(current.name),
                    schema,
                });
            }
            SchemaOrRef::Ref { ref_path } => current = resolve(ref_path, components)?,
        }
    }
}

/// Display rows for the properties of one level.
pub fn rows<'a>(node: &TreeNode<'a>) -> Vec<PropertyRow<'a>> {
    node.schema
        .properties
        .iter()
        .map(|(name, value)| property_row(node, name, value))
        .collect()
}

fn property_row<'a>(node: &TreeNode<'a>, name: &'a str, value: &'a SchemaOrRef) -> PropertyRow<'a> {
    let inline = value.as_schema();
    PropertyRow {
        name,
        type_label: value.node().type_label(),
        required: node.schema.is_required(name),
        description: inline.and_then(|s| s.description.as_deref()),
        read_only: inline.is_some_and(Schema::is_read_only),
        write_only: inline.is_some_and(Schema::is_write_only),
        expandable: is_expandable(value),
    }
}

/// A fully expanded level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedSchema<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub properties: Vec<ExpandedProperty<'a>>,
}

/// A row together with its opened child, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedProperty<'a> {
    #[serde(flatten)]
    pub row: PropertyRow<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<ExpandedSchema<'a>>,
    /// The child is a schema already open on this path and was not expanded.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cyclic: bool,
}

/// Open every expandable property below `root`, up to `max_depth` levels.
/// A reference already open on the current path is marked `cyclic` instead
/// of being opened again.
pub fn expand_all<'a>(
    root: TreeNode<'a>,
    components: &'a Components,
    max_depth: usize,
) -> ExpandedSchema<'a> {
    let mut expander = Expander {
        components,
        max_depth,
        open: Vec::new(),
    };
    expander.expand(root, 0)
}

struct Expander<'a> {
    components: &'a Components,
    max_depth: usize,
    open: Vec<&'a str>,
}

impl<'a> Expander<'a> {
    fn expand(&mut self, node: TreeNode<'a>, depth: usize) -> ExpandedSchema<'a> {
        if let Some(name) = node.name {
            self.open.push(name);
        }

        let mut properties = Vec::with_capacity(node.schema.properties.len());
        for (name, value) in &node.schema.properties {
            let row = property_row(&node, name, value);
            let mut children = None;
            let mut cyclic = false;
            if let Some(child) = child_schema(value, self.components) {
                if child.name.is_some_and(|n| self.open.contains(&n)) {
                    cyclic = true;
                } else if depth < self.max_depth {
                    children = Some(self.expand(child, depth + 1));
                }
            }
            properties.push(ExpandedProperty {
                row,
                children,
                cyclic,
            });
        }

        if node.name.is_some() {
            self.open.pop();
        }
        ExpandedSchema {
            name: node.name,
            properties,
        }
    }
}

impl ExpandedSchema<'_> {
    /// Indented text rendering; mandatory properties carry a `*`.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(name) = self.name {
            lines.push(name.to_string());
        }
        self.render_into(&mut lines, 1);
        lines.join("\n")
    }

    fn render_into(&self, lines: &mut Vec<String>, indent: usize) {
        let pad = "  ".repeat(indent);
        for property in &self.properties {
            let row = &property.row;
            let mut line = format!("{pad}{}", row.name);
            if row.required {
                line.push('*');
            }
            line.push_str(": ");
            line.push_str(&row.type_label);
            if row.read_only {
                line.push_str(" (read-only)");
            }
            if row.write_only {
                line.push_str(" (write-only)");
            }
            if property.cyclic {
                line.push_str(" (recursive)");
            }
            if let Some(description) = row.description {
                line.push_str(" - ");
                line.push_str(description);
            }
            lines.push(line);
            if let Some(ref children) = property.children {
                children.render_into(lines, indent + 1);
            }
        }
    }
}
