use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{MediaType, json_schema};
use super::schema::SchemaOrRef;

/// A request body definition. A `$ref` body deserializes to an empty body:
/// present, but without interpretable content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        json_schema(&self.content)
    }
}
