use clearapi_core::parse;
use clearapi_core::parse::operation::HttpMethod;
use clearapi_core::parse::spec::OpenApiSpec;
use clearapi_core::view::{
    child_schema, component_node, expand_all, group_operations, render_outline, root_node, rows,
};

const PETSTORE: &str = include_str!("fixtures/petstore.json");

fn petstore() -> OpenApiSpec {
    parse::from_json(PETSTORE).unwrap()
}

#[test]
fn groups_by_tag_with_path_fallback() {
    let spec = petstore();
    let groups = group_operations(&spec.paths);

    let names: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["pets", "admin", "store", "users"]);

    let pets: Vec<(HttpMethod, &str)> = groups["pets"]
        .iter()
        .map(|op| (op.method, op.path))
        .collect();
    assert_eq!(
        pets,
        vec![
            (HttpMethod::Get, "/pets"),
            (HttpMethod::Post, "/pets"),
            (HttpMethod::Get, "/pets/{petId}"),
            (HttpMethod::Delete, "/pets/{petId}"),
        ]
    );
    assert_eq!(groups["admin"].len(), 1);
    assert_eq!(
        groups["admin"][0].operation.operation_id.as_deref(),
        Some("createPet")
    );
    assert_eq!(groups["store"][0].path, "/store/inventory");
}

#[test]
fn every_operation_lands_in_a_group() {
    let spec = petstore();
    let groups = group_operations(&spec.paths);
    for (path, item) in &spec.paths {
        for method in item.operations.keys() {
            assert!(
                groups
                    .values()
                    .flatten()
                    .any(|op| op.path == path && op.method == *method),
                "{method} {path} missing"
            );
        }
    }
}

#[test]
fn response_schema_tree() {
    let spec = petstore();
    let list = &spec.paths["/pets"].operations[&HttpMethod::Get];
    let schema = list.responses["200"].json_schema().unwrap();
    let node = root_node(schema, &spec.components).unwrap();
    assert_eq!(node.name, Some("Pet"));

    let pet_rows = rows(&node);
    let owner = &node.schema.properties["owner"];
    assert!(pet_rows.iter().find(|r| r.name == "owner").unwrap().expandable);

    let owner_node = child_schema(owner, &spec.components).unwrap();
    let marked: Vec<&str> = rows(&owner_node)
        .into_iter()
        .filter(|r| r.required)
        .map(|r| r.name)
        .collect();
    assert_eq!(marked, vec!["email"]);
}

#[test]
fn expanded_tree_serializes() {
    let spec = petstore();
    let pet = component_node("PetRef", &spec.components).unwrap();
    let tree = expand_all(pet, &spec.components, 8);
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(value["name"], "Pet");
    assert_eq!(value["properties"][0]["name"], "id");
    assert_eq!(value["properties"][0]["type"], "integer");
    assert_eq!(value["properties"][0]["required"], true);
    assert_eq!(value["properties"][0]["read_only"], true);

    let parent = &value["properties"][6];
    assert_eq!(parent["name"], "parent");
    assert_eq!(parent["cyclic"], true);
    assert!(parent.get("children").is_none());

    let tags = &value["properties"][5];
    assert_eq!(tags["type"], "Tag[]");
    assert_eq!(tags["children"]["properties"][0]["name"], "label");
}

#[test]
fn outline_lists_groups_and_markers() {
    let spec = petstore();
    let outline = render_outline(&spec);

    assert!(outline.starts_with("Petstore\nVersion: 1.2.0\nServer: https://petstore.example.com/v1/\n"));
    assert!(outline.contains("  [pets]\n    GET /pets - List all pets\n      Parameters:\n        - limit (query): Page size\n"));
    assert!(outline.contains("    POST /pets - Create a pet\n      Body: Pet to add\n"));
    assert!(outline.contains("    DELETE /pets/{petId} - deletePet (deprecated)\n"));
    assert!(outline.contains("        - 200: A page of pets [schema: Pet]\n"));
    assert!(outline.contains("        - default: Unexpected error\n"));
    assert!(outline.contains("    POST /users/{id}/roles - assignRole\n      Body: No description\n"));
    assert!(outline.contains("  PetRef\n    - id: integer (mandatory)\n"));
}
