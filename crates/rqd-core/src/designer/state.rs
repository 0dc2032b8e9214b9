use indexmap::IndexMap;
use serde_json::Value;

/// The single source of truth for user intent: the current selection plus
/// all user-entered values. Every mutation flows through [`DesignerState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignerState {
    pub selected_path: String,
    pub selected_method: String,
    pub path_values: IndexMap<String, String>,
    pub query_values: IndexMap<String, String>,
    pub body_values: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
}

/// A partial update to the designer state. Present map fields replace the
/// corresponding map wholesale, matching a form layer that reports its
/// complete value set on every change.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub selected_path: Option<String>,
    pub selected_method: Option<String>,
    pub path_values: Option<IndexMap<String, String>>,
    pub query_values: Option<IndexMap<String, String>>,
    pub body_values: Option<IndexMap<String, Value>>,
    pub headers: Option<IndexMap<String, String>>,
}

impl DesignerState {
    /// Merge a partial patch. The single write entry point: callers never
    /// reach into the maps directly, so a downstream recomputation always
    /// observes the fully merged state.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(path) = patch.selected_path {
            self.selected_path = path;
        }
        if let Some(method) = patch.selected_method {
            self.selected_method = method;
        }
        if let Some(values) = patch.path_values {
            self.path_values = values;
        }
        if let Some(values) = patch.query_values {
            self.query_values = values;
        }
        if let Some(values) = patch.body_values {
            self.body_values = values;
        }
        if let Some(headers) = patch.headers {
            self.headers = headers;
        }
    }

    /// Clear all operation-scoped values. Header entries survive; they
    /// are not tied to the resolved operation.
    pub fn reset_values(&mut self) {
        self.path_values.clear();
        self.query_values.clear();
        self.body_values.clear();
    }
}
