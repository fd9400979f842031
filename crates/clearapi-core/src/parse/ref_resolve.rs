use super::components::Components;
use super::schema::SchemaOrRef;
use crate::error::ResolveError;

/// Prefix of the only reference form clearapi resolves.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A component schema found by reference: its registered name and the schema
/// exactly as it appears under `components.schemas`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSchema<'a> {
    pub name: &'a str,
    pub schema: &'a SchemaOrRef,
}

/// Resolve `#/components/schemas/<Name>` against `components`.
///
/// Only one level is followed: if the registered schema is itself a
/// reference it is returned as-is, and callers descend further on demand.
pub fn try_resolve<'a>(
    ref_path: &str,
    components: &'a Components,
) -> Result<ResolvedSchema<'a>, ResolveError> {
    let name = parse_ref_name(ref_path, "schemas")?;
    components
        .schemas
        .get_key_value(name)
        .map(|(name, schema)| ResolvedSchema { name, schema })
        .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
}

/// Like [`try_resolve`], but an unresolvable reference is simply absent.
pub fn resolve<'a>(ref_path: &str, components: &'a Components) -> Option<ResolvedSchema<'a>> {
    match try_resolve(ref_path, components) {
        Ok(resolved) => Some(resolved),
        Err(e) => {
            log::debug!("{e}");
            None
        }
    }
}

/// Build the reference string for a component schema name.
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// Last segment of a reference, used as a display name.
/// e.g. `#/components/schemas/Pet` → `Pet`
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    if name.is_empty() || name.contains('/') {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok(name)
}
