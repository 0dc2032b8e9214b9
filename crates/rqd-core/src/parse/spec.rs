use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::PathItem;
use super::server::Server;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level API specification document. Loaded once and treated as
/// read-only for the lifetime of a designer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    pub openapi: String,

    pub info: Info,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
}

impl ApiSpec {
    /// Base URL for synthesized requests: the first server entry's URL,
    /// or empty when no servers are declared.
    pub fn base_url(&self) -> &str {
        self.servers.first().map(|s| s.url.as_str()).unwrap_or("")
    }
}
