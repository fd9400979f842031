use indexmap::IndexMap;

use crate::parse::operation::{HttpMethod, Operation, PathItem};

/// Group name used when neither a tag nor a path segment is available.
pub const DEFAULT_GROUP: &str = "default";

/// One operation as listed in a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

/// Operations keyed by group name, in order of first appearance.
pub type OperationGroups<'a> = IndexMap<String, Vec<GroupedOperation<'a>>>;

/// Group every operation under each of its tags, or under a name derived
/// from its path when it has none.
///
/// Entries keep path order, then method order within a path.
pub fn group_operations(paths: &IndexMap<String, PathItem>) -> OperationGroups<'_> {
    let mut groups: OperationGroups<'_> = IndexMap::new();

    for (path, item) in paths {
        for (method, operation) in &item.operations {
            let entry = GroupedOperation {
                path,
                method: *method,
                operation,
            };
            if operation.tags.is_empty() {
                groups.entry(extract_path_prefix(path)).or_default().push(entry);
                continue;
            }
            for (i, tag) in operation.tags.iter().enumerate() {
                // tags form a set; a repeated tag lists the operation once
                if operation.tags[..i].contains(tag) {
                    continue;
                }
                groups.entry(tag.clone()).or_default().push(entry);
            }
        }
    }

    log::debug!(
        "grouped {} paths into {} groups",
        paths.len(),
        groups.len()
    );
    groups
}

/// Extract the first non-empty path segment as a group name.
/// e.g. "/pets/{petId}" → "pets", "/store/inventory" → "store"
fn extract_path_prefix(path: &str) -> String {
    path.split('/')
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GROUP)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(json: &str) -> IndexMap<String, PathItem> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_path_prefix() {
        assert_eq!(extract_path_prefix("/pets"), "pets");
        assert_eq!(extract_path_prefix("/pets/{petId}"), "pets");
        assert_eq!(extract_path_prefix("/store/inventory"), "store");
        assert_eq!(extract_path_prefix("/{id}"), "{id}");
        assert_eq!(extract_path_prefix("health"), "health");
        assert_eq!(extract_path_prefix("/"), "default");
        assert_eq!(extract_path_prefix(""), "default");
    }

    #[test]
    fn test_untagged_operation_uses_path() {
        let paths = paths(r#"{"/orders/{id}": {"get": {}}}"#);
        let groups = group_operations(&paths);
        assert_eq!(groups.len(), 1);
        let orders = &groups["orders"];
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].path, "/orders/{id}");
        assert_eq!(orders[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_tags_fan_out() {
        let paths = paths(r#"{"/invoices": {"post": {"tags": ["Billing", "Public"]}}}"#);
        let groups = group_operations(&paths);
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Billing", "Public"]);
        assert_eq!(groups["Billing"][0].method, HttpMethod::Post);
        assert_eq!(groups["Public"][0].method, HttpMethod::Post);
    }

    #[test]
    fn test_repeated_tag_lists_once() {
        let paths = paths(r#"{"/a": {"get": {"tags": ["x", "x"]}}}"#);
        let groups = group_operations(&paths);
        assert_eq!(groups["x"].len(), 1);
    }

    #[test]
    fn test_order_follows_document() {
        let paths = paths(
            r#"{
                "/pets": {"post": {"tags": ["pets"]}, "get": {"tags": ["pets"]}},
                "/": {"get": {}},
                "/pets/{id}": {"delete": {"tags": ["pets"]}}
            }"#,
        );
        let groups = group_operations(&paths);
        let names: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["pets", "default"]);

        let pets: Vec<(&str, HttpMethod)> = groups["pets"]
            .iter()
            .map(|op| (op.path, op.method))
            .collect();
        assert_eq!(
            pets,
            vec![
                ("/pets", HttpMethod::Post),
                ("/pets", HttpMethod::Get),
                ("/pets/{id}", HttpMethod::Delete),
            ]
        );
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let paths = paths(r#"{"/a": {"get": {"tags": ["t"]}}, "/b/c": {"put": {}}}"#);
        let first: Vec<_> = group_operations(&paths).into_iter().collect();
        let second: Vec<_> = group_operations(&paths).into_iter().collect();
        assert_eq!(first, second);
    }
}
