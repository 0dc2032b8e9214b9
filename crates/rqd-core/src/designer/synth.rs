use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;

use super::state::DesignerState;
use crate::parse::spec::ApiSpec;

/// The `encodeURIComponent` unreserved set: everything but
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The fully resolved, ready-to-transmit request. Always derived, never
/// stored: recompute from the document and the designer state on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRequest {
    pub method: String,
    pub url: String,
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Synthesize the effective request. Pure function of its inputs: two
/// calls with an unchanged document and state produce identical output,
/// so it is safe to recompute on every state mutation.
pub fn synthesize(doc: &ApiSpec, state: &DesignerState) -> EffectiveRequest {
    let mut path = state.selected_path.clone();

    // Substitute path parameters. A placeholder whose value is empty or
    // missing stays verbatim in the URL so the gap is visible to the
    // user rather than silently dropped. Only the first occurrence of a
    // duplicated placeholder is substituted.
    for (name, value) in &state.path_values {
        if value.is_empty() {
            continue;
        }
        let placeholder = format!("{{{name}}}");
        let encoded = utf8_percent_encode(value, COMPONENT).to_string();
        path = path.replacen(&placeholder, &encoded, 1);
    }

    let query = state
        .query_values
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, COMPONENT),
                utf8_percent_encode(value, COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let url = if query.is_empty() {
        format!("{}{}", doc.base_url(), path)
    } else {
        format!("{}{}?{}", doc.base_url(), path, query)
    };

    let mut headers = IndexMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    for (key, value) in &state.headers {
        headers.insert(key.clone(), value.clone());
    }

    EffectiveRequest {
        method: state.selected_method.to_uppercase(),
        url,
        headers,
        body: body_for(state),
    }
}

// Body values are only attached for non-GET methods, with null and
// empty-string entries filtered out; an empty filtered map means no
// body at all, not an empty object.
fn body_for(state: &DesignerState) -> Option<Value> {
    if state.selected_method.eq_ignore_ascii_case("get") {
        return None;
    }

    let filtered: serde_json::Map<String, Value> = state
        .body_values
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Null) && value.as_str() != Some(""))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if filtered.is_empty() {
        None
    } else {
        Some(Value::Object(filtered))
    }
}
