pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod schema;
pub mod server;
pub mod spec;

use crate::error::ParseError;
use spec::ApiSpec;

/// Parse an API specification document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiSpec, ParseError> {
    let spec: ApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an API specification document from JSON.
pub fn from_json(input: &str) -> Result<ApiSpec, ParseError> {
    let spec: ApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &ApiSpec) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}
