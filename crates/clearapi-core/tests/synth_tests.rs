use clearapi_core::parse;
use clearapi_core::parse::operation::{HttpMethod, Operation};
use clearapi_core::parse::ref_resolve::schema_ref;
use clearapi_core::parse::schema::SchemaOrRef;
use clearapi_core::parse::spec::OpenApiSpec;
use clearapi_core::synth::{
    CommandOptions, ExampleContext, build_command, build_command_with_options, example_json,
    synthesize_default, synthesize_example,
};
use serde_json::json;

const PETSTORE: &str = include_str!("fixtures/petstore.json");

fn petstore() -> OpenApiSpec {
    parse::from_json(PETSTORE).unwrap()
}

fn op<'a>(spec: &'a OpenApiSpec, path: &str, method: HttpMethod) -> &'a Operation {
    &spec.paths[path].operations[&method]
}

fn component(name: &str) -> SchemaOrRef {
    SchemaOrRef::Ref {
        ref_path: schema_ref(name),
    }
}

#[test]
fn command_for_role_assignment() {
    let spec = petstore();
    let operation = op(&spec, "/users/{id}/roles", HttpMethod::Post);
    let cmd = build_command(
        HttpMethod::Post,
        "/users/{id}/roles",
        operation,
        Some("https://api.example.com/"),
        &spec.components,
    );
    let expected = [
        "curl -X POST \"https://api.example.com/users/:id/roles\" \\",
        "  -H \"Content-Type: application/json\" \\",
        "  -H \"Authorization: Bearer <token>\" \\",
        "  -d '{",
        "  \"role\": \"admin\"",
        "}'",
    ]
    .join("\n");
    assert_eq!(cmd, expected);

    let payload = cmd.split_once("-d '").unwrap().1.trim_end_matches('\'');
    let body: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(body, json!({"role": "admin"}));
}

#[test]
fn command_uses_literal_defaults_for_referenced_body() {
    let spec = petstore();
    let cmd = build_command(
        HttpMethod::Post,
        "/pets",
        op(&spec, "/pets", HttpMethod::Post),
        spec.server_url(),
        &spec.components,
    );
    assert!(cmd.starts_with("curl -X POST \"https://petstore.example.com/v1/pets\""));
    let payload = cmd.split_once("-d '").unwrap().1.trim_end_matches('\'');
    let body: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(
        body,
        json!({"name": "Rex", "age": 1, "vaccinated": false, "tags": []})
    );
}

#[test]
fn command_without_body() {
    let spec = petstore();
    let cmd = build_command_with_options(
        HttpMethod::Delete,
        "/pets/{petId}",
        op(&spec, "/pets/{petId}", HttpMethod::Delete),
        None,
        &spec.components,
        &CommandOptions {
            token: "abc".to_string(),
        },
    );
    insta::assert_snapshot!(cmd, @r#"
    curl -X DELETE "/pets/:petId" \
      -H "Authorization: Bearer abc"
    "#);
}

#[test]
fn response_example_hides_write_only() {
    let spec = petstore();
    let value = synthesize_example(&component("Pet"), &spec.components, ExampleContext::Response);
    assert_eq!(
        value,
        Some(json!({
            "id": 0,
            "name": "string",
            "status": "string",
            "owner": {"email": "string", "nickname": "string"},
            "tags": [{"label": "string"}],
            "parent": {}
        }))
    );
}

#[test]
fn request_example_hides_read_only() {
    let spec = petstore();
    let value =
        synthesize_example(&component("Pet"), &spec.components, ExampleContext::Request).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "status", "secret", "owner", "tags", "parent"]);
}

#[test]
fn array_response_example() {
    let spec = petstore();
    let list = op(&spec, "/pets", HttpMethod::Get);
    let schema = list.responses["200"].json_schema().unwrap();
    let value = synthesize_example(schema, &spec.components, ExampleContext::Response).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(synthesize_default(schema, &spec.components), Some(json!([])));
}

#[test]
fn inventory_examples() {
    let spec = petstore();
    let inventory = component("Inventory");
    assert_eq!(
        example_json(&inventory, &spec.components, ExampleContext::Response).unwrap(),
        "{\n  \"counts\": [\n    0\n  ]\n}"
    );
    assert_eq!(
        synthesize_default(&inventory, &spec.components),
        Some(json!({"counts": []}))
    );
}

#[test]
fn reference_chain_is_followed() {
    let spec = petstore();
    let direct = synthesize_default(&component("Pet"), &spec.components);
    let chained = synthesize_default(&component("PetRef"), &spec.components);
    assert!(direct.is_some());
    assert_eq!(direct, chained);
}

#[test]
fn synthesis_is_repeatable() {
    let spec = petstore();
    for name in spec.components.schemas.keys() {
        let schema = component(name);
        assert_eq!(
            synthesize_default(&schema, &spec.components),
            synthesize_default(&schema, &spec.components)
        );
        assert_eq!(
            synthesize_example(&schema, &spec.components, ExampleContext::Neutral),
            synthesize_example(&schema, &spec.components, ExampleContext::Neutral)
        );
    }
}
