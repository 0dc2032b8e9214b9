use rqd_core::parse;
use rqd_core::parse::operation::HttpMethod;
use rqd_core::parse::parameter::ParameterLocation;
use rqd_core::parse::schema::SchemaType;

const USERS_API: &str = include_str!("fixtures/users-api.yaml");

#[test]
fn parse_users_api_yaml() {
    let spec = parse::from_yaml(USERS_API).expect("should parse users-api.yaml");
    assert_eq!(spec.openapi, "3.0.0");
    assert_eq!(spec.info.title, "Sample API");
    assert_eq!(spec.paths.len(), 4);
    assert_eq!(spec.base_url(), "https://api.example.com/v1");
}

#[test]
fn parse_operation_parameters() {
    let spec = parse::from_yaml(USERS_API).unwrap();
    let item = spec.paths.get("/users/{id}").expect("should have path");
    let get = item.get.as_ref().expect("should have GET");

    assert_eq!(get.parameters.len(), 3);
    assert_eq!(get.parameters[0].name, "id");
    assert_eq!(get.parameters[0].location, ParameterLocation::Path);
    assert!(get.parameters[0].required);

    let format = &get.parameters[2];
    let schema = format.schema.as_ref().unwrap().as_schema().unwrap();
    assert_eq!(schema.schema_type, Some(SchemaType::String));
    assert_eq!(schema.enum_values.len(), 2);
}

#[test]
fn parse_request_body_schema() {
    let spec = parse::from_yaml(USERS_API).unwrap();
    let put = spec.paths["/users/{id}"].put.as_ref().unwrap();
    let body = put.request_body.as_ref().unwrap();
    assert!(body.required);

    let schema = body.json_schema().unwrap().as_schema().unwrap();
    assert_eq!(schema.schema_type, Some(SchemaType::Object));
    assert_eq!(schema.properties.len(), 4);
    assert_eq!(schema.required, vec!["name", "email"]);

    let age = schema.properties["age"].as_schema().unwrap();
    assert_eq!(age.schema_type, Some(SchemaType::Integer));
    assert_eq!(age.minimum, Some(0.0));
    assert_eq!(age.maximum, Some(150.0));
}

#[test]
fn declared_methods_in_order() {
    let spec = parse::from_yaml(USERS_API).unwrap();
    let item = &spec.paths["/users/{id}"];
    assert_eq!(item.methods(), vec![HttpMethod::Get, HttpMethod::Put]);
    assert!(item.operation(HttpMethod::Delete).is_none());
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(result.is_err());
}

#[test]
fn parse_json_document() {
    let json = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Mini", "version": "0.1" },
  "paths": { "/ping": { "get": { "summary": "ping" } } }
}"#;
    let spec = parse::from_json(json).expect("should parse JSON spec");
    assert_eq!(spec.paths.len(), 1);
    assert_eq!(spec.base_url(), "");
}
