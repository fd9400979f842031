use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{MediaType, json_schema};
use super::schema::SchemaOrRef;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        json_schema(&self.content)
    }
}
