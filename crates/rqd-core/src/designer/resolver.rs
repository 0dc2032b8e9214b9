use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::schema::SchemaType;
use crate::parse::spec::ApiSpec;

/// A flattened request-body property descriptor, derived from an inline
/// object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyField {
    pub name: String,
    pub field_type: Option<SchemaType>,
    pub format: Option<String>,
    pub required: bool,
    pub enum_values: Vec<serde_json::Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub description: Option<String>,
}

/// Locate the operation addressed by a (path, method) selection. Method
/// lookup is case-insensitive. A miss on either key is a normal transient
/// state while the user switches selections, so the result is an Option,
/// not an error.
pub fn resolve<'a>(doc: &'a ApiSpec, path: &str, method: &str) -> Option<&'a Operation> {
    let item = doc.paths.get(path)?;
    let method = HttpMethod::parse(method)?;
    item.operation(method)
}

/// Path-located parameters, in declaration order.
pub fn path_parameters(op: &Operation) -> Vec<&Parameter> {
    params_in(op, ParameterLocation::Path)
}

/// Query-located parameters, in declaration order.
pub fn query_parameters(op: &Operation) -> Vec<&Parameter> {
    params_in(op, ParameterLocation::Query)
}

fn params_in(op: &Operation, location: ParameterLocation) -> Vec<&Parameter> {
    op.parameters
        .iter()
        .filter(|p| p.location == location)
        .collect()
}

/// Flatten the operation's `application/json` body schema into field
/// descriptors. Anything other than an inline object schema with a
/// non-empty properties map (absent body, `$ref`, array or scalar type)
/// yields an empty list, same as having no body at all.
pub fn body_fields(op: &Operation) -> Vec<BodyField> {
    let Some(body) = op.request_body.as_ref() else {
        return Vec::new();
    };
    let Some(schema) = body.json_schema().and_then(|s| s.as_schema()) else {
        return Vec::new();
    };
    if schema.schema_type != Some(SchemaType::Object) || schema.properties.is_empty() {
        return Vec::new();
    }

    schema
        .properties
        .iter()
        .filter_map(|(name, prop)| prop.as_schema().map(|p| (name, p)))
        .map(|(name, prop)| BodyField {
            name: name.clone(),
            field_type: prop.schema_type,
            format: prop.format.clone(),
            required: schema.required.iter().any(|r| r == name),
            enum_values: prop.enum_values.clone(),
            minimum: prop.minimum,
            maximum: prop.maximum,
            description: prop.description.clone(),
        })
        .collect()
}
