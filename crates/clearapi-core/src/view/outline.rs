use crate::parse::components::Components;
use crate::parse::operation::Operation;
use crate::parse::response::Response;
use crate::parse::spec::OpenApiSpec;

use super::grouping::{GroupedOperation, group_operations};
use super::tree::{component_node, root_node, rows};

/// Render the document as a plain-text outline: header, endpoints per group,
/// then component schemas with their top-level properties.
pub fn render_outline(spec: &OpenApiSpec) -> String {
    let mut lines = Vec::new();

    lines.push(spec.info.title.as_deref().unwrap_or("API Untitled").to_string());
    lines.push(format!(
        "Version: {}",
        spec.info.version.as_deref().unwrap_or("N/A")
    ));
    if let Some(url) = spec.server_url() {
        lines.push(format!("Server: {url}"));
    }

    lines.push(String::new());
    lines.push("Endpoints".to_string());
    if spec.paths.is_empty() {
        lines.push("  No endpoints found.".to_string());
    }
    for (group, operations) in group_operations(&spec.paths) {
        lines.push(format!("  [{group}]"));
        for entry in operations {
            render_operation(&mut lines, &entry, &spec.components);
        }
    }

    if !spec.components.schemas.is_empty() {
        lines.push(String::new());
        lines.push("Schemas".to_string());
        for name in spec.components.schemas.keys() {
            lines.push(format!("  {name}"));
            let Some(node) = component_node(name, &spec.components) else {
                continue;
            };
            for row in rows(&node) {
                let marker = if row.required { " (mandatory)" } else { "" };
                lines.push(format!("    - {}: {}{marker}", row.name, row.type_label));
            }
        }
    }

    lines.join("\n")
}

fn render_operation(lines: &mut Vec<String>, entry: &GroupedOperation<'_>, components: &Components) {
    let op: &Operation = entry.operation;
    let deprecated = if op.deprecated.unwrap_or(false) {
        " (deprecated)"
    } else {
        ""
    };
    lines.push(format!(
        "    {} {} - {}{deprecated}",
        entry.method,
        entry.path,
        op.title().unwrap_or("No summary")
    ));
    if let Some(ref description) = op.description {
        lines.push(format!("      {description}"));
    }

    let params: Vec<_> = op.parameters.iter().filter_map(|p| p.as_parameter()).collect();
    if !params.is_empty() {
        lines.push("      Parameters:".to_string());
        for param in params {
            let mut line = format!("        - {} ({})", param.name, param.location.as_str());
            if param.required {
                line.push_str(" mandatory");
            }
            if let Some(ref description) = param.description {
                line.push_str(": ");
                line.push_str(description);
            }
            lines.push(line);
        }
    }

    if let Some(ref body) = op.request_body {
        lines.push(format!(
            "      Body: {}",
            body.description.as_deref().unwrap_or("No description")
        ));
    }

    if !op.responses.is_empty() {
        lines.push("      Responses:".to_string());
        for (code, response) in &op.responses {
            lines.push(format!(
                "        - {code}: {}{}",
                response.description.as_deref().unwrap_or("No description"),
                schema_marker(response, components)
            ));
        }
    }
}

/// `[schema: Name]` when the response's JSON schema can be opened; nothing
/// when it is missing or does not resolve.
fn schema_marker(response: &Response, components: &Components) -> String {
    let Some(schema) = response.json_schema() else {
        return String::new();
    };
    match root_node(schema, components) {
        Some(node) => format!(" [schema: {}]", node.name.unwrap_or("inline")),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_empty_document() {
        let spec = parse::from_json("{}").unwrap();
        let expected = [
            "API Untitled",
            "Version: N/A",
            "",
            "Endpoints",
            "  No endpoints found.",
        ]
        .join("\n");
        assert_eq!(render_outline(&spec), expected);
    }

    #[test]
    fn test_unresolved_response_schema_keeps_description() {
        let spec = parse::from_json(
            r##"{
                "openapi": "3.0.3",
                "info": {"title": "Shop", "version": "2.1"},
                "servers": [{"url": "https://shop.example.com"}],
                "paths": {
                    "/orders/{id}": {
                        "get": {
                            "operationId": "getOrder",
                            "parameters": [
                                {"name": "id", "in": "path", "required": true, "description": "Order id"}
                            ],
                            "responses": {
                                "200": {
                                    "description": "The order",
                                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Order"}}}
                                },
                                "404": {
                                    "description": "Missing",
                                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Gone"}}}
                                }
                            }
                        }
                    }
                },
                "components": {"schemas": {
                    "Order": {"type": "object", "required": ["id"], "properties": {"id": {"type": "string"}}}
                }}
            }"##,
        )
        .unwrap();
        let expected = [
            "Shop",
            "Version: 2.1",
            "Server: https://shop.example.com",
            "",
            "Endpoints",
            "  [orders]",
            "    GET /orders/{id} - getOrder",
            "      Parameters:",
            "        - id (path) mandatory: Order id",
            "      Responses:",
            "        - 200: The order [schema: Order]",
            "        - 404: Missing",
            "",
            "Schemas",
            "  Order",
            "    - id: string (mandatory)",
        ]
        .join("\n");
        assert_eq!(render_outline(&spec), expected);
    }
}
