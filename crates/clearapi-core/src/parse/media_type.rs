use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// The only media type whose schema clearapi interprets.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}

/// Schema of the `application/json` entry of a content map, if any.
pub fn json_schema(content: &IndexMap<String, MediaType>) -> Option<&SchemaOrRef> {
    content.get(JSON_MEDIA_TYPE)?.schema.as_ref()
}
