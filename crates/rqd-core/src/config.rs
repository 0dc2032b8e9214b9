use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Project configuration loaded from `.rqd.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RqdConfig {
    /// Specification document to load.
    pub input: String,
    /// Overrides the document's first server URL when set.
    pub base_url: Option<String>,
    /// Headers seeded into every new session.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

impl Default for RqdConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            base_url: None,
            headers: IndexMap::new(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rqd.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RqdConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: RqdConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rqd configuration
input: openapi.yaml

# base_url: https://staging.example.com   # overrides the spec's first server

headers: {}
  # Authorization: Bearer dev-token
  # X-Request-Source: rqd
"#
}
