use thiserror::Error;

/// Errors raised while loading a specification document. Everything past
/// the parse boundary is total: resolution misses, malformed body
/// schemas, and unreplaced placeholders all surface as explicit empty or
/// default results, never as errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}
