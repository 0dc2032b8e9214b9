use rqd_core::designer::{
    Rule, Session, SlotLocation, SlotSet, StatePatch, body_fields, path_parameters,
    query_parameters, resolve,
};
use rqd_core::parse;
use rqd_core::parse::spec::ApiSpec;

const USERS_API: &str = include_str!("fixtures/users-api.yaml");

fn spec() -> ApiSpec {
    parse::from_yaml(USERS_API).unwrap()
}

#[test]
fn resolve_hits_and_misses() {
    let doc = spec();
    assert!(resolve(&doc, "/users/{id}", "get").is_some());
    assert!(resolve(&doc, "/users/{id}", "PUT").is_some(), "method lookup is case-insensitive");
    assert!(resolve(&doc, "/users/{id}", "delete").is_none());
    assert!(resolve(&doc, "/nope", "get").is_none());
    assert!(resolve(&doc, "/users/{id}", "not-a-method").is_none());
}

#[test]
fn parameter_partition_preserves_order() {
    let doc = spec();
    let op = resolve(&doc, "/users/{id}", "get").unwrap();

    let path_params = path_parameters(op);
    assert_eq!(path_params.len(), 1);
    assert_eq!(path_params[0].name, "id");

    let query_params = query_parameters(op);
    let names: Vec<_> = query_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["include", "format"]);
}

#[test]
fn body_fields_from_object_schema() {
    let doc = spec();
    let op = resolve(&doc, "/users/{id}", "put").unwrap();

    let fields = body_fields(op);
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["name", "email", "age", "active"]);

    let email = &fields[1];
    assert!(email.required);
    assert_eq!(email.format.as_deref(), Some("email"));

    let active = &fields[3];
    assert!(!active.required);
}

#[test]
fn non_object_body_yields_no_fields() {
    let doc = spec();

    // Array-shaped body
    let op = resolve(&doc, "/events", "post").unwrap();
    assert!(body_fields(op).is_empty());

    // No body at all
    let op = resolve(&doc, "/ping", "get").unwrap();
    assert!(body_fields(op).is_empty());
}

#[test]
fn slot_set_covers_all_inputs() {
    let doc = spec();
    let op = resolve(&doc, "/users/{id}", "put");
    let slots = SlotSet::rebuild(op);

    // 1 path param + 4 body fields
    assert_eq!(slots.len(), 5);
    assert!(slots.get(SlotLocation::Path, "id").is_some());
    assert!(slots.get(SlotLocation::Body, "email").is_some());
    assert!(slots.get(SlotLocation::Query, "include").is_none());

    let email = slots.get(SlotLocation::Body, "email").unwrap();
    assert!(email.value.is_empty(), "slots start empty");
    assert!(email.rules.contains(&Rule::Required));
    assert!(email.rules.contains(&Rule::Email));

    let age = slots.get(SlotLocation::Body, "age").unwrap();
    assert!(age.rules.contains(&Rule::Min(0.0)));
    assert!(age.rules.contains(&Rule::Max(150.0)));
}

#[test]
fn unresolved_operation_yields_zero_slots() {
    let slots = SlotSet::rebuild(None);
    assert!(slots.is_empty());
}

#[test]
fn session_defaults_to_first_declared_operation() {
    let session = Session::new(spec());
    assert_eq!(session.state().selected_path, "/users/{id}");
    assert_eq!(session.state().selected_method, "get");
    assert_eq!(session.slots().len(), 3);
}

#[test]
fn session_switch_resets_values() {
    let mut session = Session::new(spec());
    session.set_value(SlotLocation::Path, "id", "42");
    session.set_value(SlotLocation::Query, "include", "posts");
    assert!(!session.state().path_values.is_empty());

    session.select_path("/users");
    assert!(session.state().path_values.is_empty());
    assert!(session.state().query_values.is_empty());
    assert!(session.state().body_values.is_empty());
    assert_eq!(session.state().selected_method, "get");

    // Switching methods also resets
    session.set_value(SlotLocation::Query, "limit", "10");
    session.select_method("post");
    assert!(session.state().query_values.is_empty());
    assert_eq!(session.slots().len(), 2, "body fields for POST /users");
}

#[test]
fn update_patch_selection_triggers_switch_side_effects() {
    let mut session = Session::new(spec());
    session.set_value(SlotLocation::Path, "id", "42");
    session.set_value(SlotLocation::Query, "include", "posts");

    // Selection changes through the patch entry point get the same
    // treatment as select_path: slot rebuild plus value reset.
    session.update(StatePatch {
        selected_path: Some("/ping".to_string()),
        ..Default::default()
    });
    assert_eq!(session.state().selected_path, "/ping");
    assert!(session.slots().is_empty(), "slots rebuilt for GET /ping");
    assert!(session.state().path_values.is_empty());
    assert!(session.state().query_values.is_empty());

    // An undeclared method in a patch falls back like select_method.
    session.update(StatePatch {
        selected_path: Some("/users/{id}".to_string()),
        selected_method: Some("delete".to_string()),
        ..Default::default()
    });
    assert_eq!(session.state().selected_method, "get");
    assert_eq!(session.slots().len(), 3);
}

#[test]
fn update_patch_values_land_after_selection_reset() {
    let mut session = Session::new(spec());
    session.select_path("/ping");

    let mut values = indexmap::IndexMap::new();
    values.insert("id".to_string(), "7".to_string());
    session.update(StatePatch {
        selected_path: Some("/users/{id}".to_string()),
        path_values: Some(values),
        ..Default::default()
    });

    // The reset belongs to the switch; values carried by the same patch
    // survive it and show up in the synthesized request.
    assert_eq!(session.state().path_values["id"], "7");
    assert!(session.effective_request().url.contains("/users/7"));
}

#[test]
fn session_headers_survive_switch() {
    let mut session = Session::new(spec());
    session.set_header("Authorization", "Bearer token");
    session.select_path("/ping");
    assert_eq!(session.state().headers["Authorization"], "Bearer token");
}

#[test]
fn undeclared_method_falls_back_to_first() {
    let mut session = Session::new(spec());
    session.select_method("delete");
    assert_eq!(session.state().selected_method, "get");

    // Path switch keeps the method when the new path declares it
    session.select_method("put");
    session.select_path("/users");
    assert_eq!(session.state().selected_method, "get", "PUT not declared on /users");
}

#[test]
fn slot_values_mirror_state() {
    let mut session = Session::new(spec());
    session.set_value(SlotLocation::Path, "id", "42");
    assert_eq!(session.slots().get(SlotLocation::Path, "id").unwrap().value, "42");
}

#[test]
fn observer_sees_merged_state() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut session = Session::new(spec());
    session.on_change(move |req| sink.borrow_mut().push(req.url.clone()));

    session.set_value(SlotLocation::Path, "id", "42");
    session.set_value(SlotLocation::Query, "include", "posts");

    let urls = seen.borrow();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].contains("/users/42"));
    assert!(urls[1].contains("include=posts"));
}
