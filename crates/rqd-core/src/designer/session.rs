use serde_json::Value;

use super::resolver::resolve;
use super::slots::{SlotLocation, SlotSet};
use super::state::{DesignerState, StatePatch};
use super::synth::{EffectiveRequest, synthesize};
use crate::parse::spec::ApiSpec;

type ChangeObserver = Box<dyn FnMut(&EffectiveRequest)>;

/// One interactive request-composition session over a single read-only
/// specification document. The document handle is threaded explicitly,
/// never ambient, so independent sessions over different documents can
/// coexist and tests stay isolated.
///
/// Mutation flows through [`Session::update`] (or the slot-addressed
/// conveniences that delegate to it); after every merge the effective
/// request is recomputed from the fully merged state and published to
/// registered observers. Observers receive a shared reference and cannot
/// write back into the session, which rules out feedback loops.
pub struct Session {
    doc: ApiSpec,
    state: DesignerState,
    slots: SlotSet,
    observers: Vec<ChangeObserver>,
}

impl Session {
    /// Open a session, selecting the document's first declared path and
    /// that path's first declared method. A document without paths
    /// starts with no resolved operation and zero slots.
    pub fn new(doc: ApiSpec) -> Session {
        let mut state = DesignerState::default();
        if let Some((path, item)) = doc.paths.first() {
            state.selected_path = path.clone();
            if let Some(method) = item.methods().first() {
                state.selected_method = method.as_lower().to_string();
            }
        }

        let slots = SlotSet::rebuild(resolve(&doc, &state.selected_path, &state.selected_method));
        Session {
            doc,
            state,
            slots,
            observers: Vec::new(),
        }
    }

    pub fn doc(&self) -> &ApiSpec {
        &self.doc
    }

    pub fn state(&self) -> &DesignerState {
        &self.state
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    /// Declared paths, in document order.
    pub fn available_paths(&self) -> Vec<&str> {
        self.doc.paths.keys().map(|p| p.as_str()).collect()
    }

    /// Methods declared for the currently selected path.
    pub fn available_methods(&self) -> Vec<&'static str> {
        self.doc
            .paths
            .get(&self.state.selected_path)
            .map(|item| item.methods().iter().map(|m| m.as_lower()).collect())
            .unwrap_or_default()
    }

    /// Select a path. The current method is kept when the new path also
    /// declares it, otherwise it falls back to the path's first declared
    /// method. Switching always rebuilds slots and clears all in-progress
    /// values; slot identity is operation-scoped.
    pub fn select_path(&mut self, path: &str) {
        self.apply_selection(Some(path.to_string()), None);
        self.publish();
    }

    /// Select a method under the current path, falling back to the
    /// path's first declared method when the requested one is absent.
    pub fn select_method(&mut self, method: &str) {
        self.apply_selection(None, Some(method.to_string()));
        self.publish();
    }

    // Transition side effect for every selection change: total slot
    // replacement plus a reset of the three value maps. Re-selecting the
    // current operation resets too; the machine does not distinguish a
    // transient toggle from a real switch. A requested method the path
    // does not declare falls back to the path's first declared method.
    fn apply_selection(&mut self, path: Option<String>, method: Option<String>) {
        let path = path.unwrap_or_else(|| self.state.selected_path.clone());
        let requested = method
            .map(|m| m.to_ascii_lowercase())
            .unwrap_or_else(|| self.state.selected_method.clone());

        let method = if resolve(&self.doc, &path, &requested).is_some() {
            requested
        } else {
            self.doc
                .paths
                .get(&path)
                .and_then(|item| item.methods().first().map(|m| m.as_lower().to_string()))
                .unwrap_or(requested)
        };

        log::debug!("selecting {method} {path}");
        self.state.selected_path = path;
        self.state.selected_method = method;
        self.slots = SlotSet::rebuild(resolve(
            &self.doc,
            &self.state.selected_path,
            &self.state.selected_method,
        ));
        self.state.reset_values();
    }

    /// Merge a partial state patch and republish the effective request.
    /// A patch that carries selection fields goes through the same
    /// switch side effects as `select_path`/`select_method` (slot
    /// rebuild, value reset) before the remaining value maps land, so
    /// the published request observes the fully merged state.
    pub fn update(&mut self, mut patch: StatePatch) {
        let path = patch.selected_path.take();
        let method = patch.selected_method.take();
        if path.is_some() || method.is_some() {
            self.apply_selection(path, method);
        }
        self.state.apply(patch);
        self.sync_slot_values();
        self.publish();
    }

    /// Write one slot's value through the patch entry point. Path and
    /// query slots hold raw strings; body slots hold a JSON string value
    /// (use [`Session::set_body_value`] for typed literals).
    pub fn set_value(&mut self, location: SlotLocation, name: &str, value: &str) {
        let mut patch = StatePatch::default();
        match location {
            SlotLocation::Path => {
                let mut values = self.state.path_values.clone();
                values.insert(name.to_string(), value.to_string());
                patch.path_values = Some(values);
            }
            SlotLocation::Query => {
                let mut values = self.state.query_values.clone();
                values.insert(name.to_string(), value.to_string());
                patch.query_values = Some(values);
            }
            SlotLocation::Body => {
                let mut values = self.state.body_values.clone();
                values.insert(name.to_string(), Value::String(value.to_string()));
                patch.body_values = Some(values);
            }
        }
        self.update(patch);
    }

    /// Write a typed body value (boolean, number, ...) for one field.
    pub fn set_body_value(&mut self, name: &str, value: Value) {
        let mut values = self.state.body_values.clone();
        values.insert(name.to_string(), value);
        self.update(StatePatch {
            body_values: Some(values),
            ..Default::default()
        });
    }

    /// Set or replace a free-form header entry.
    pub fn set_header(&mut self, name: &str, value: &str) {
        let mut headers = self.state.headers.clone();
        headers.insert(name.to_string(), value.to_string());
        self.update(StatePatch {
            headers: Some(headers),
            ..Default::default()
        });
    }

    /// Register an observer called with the freshly synthesized request
    /// after every state mutation.
    pub fn on_change(&mut self, observer: impl FnMut(&EffectiveRequest) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The effective request for the current state, recomputed on demand.
    pub fn effective_request(&self) -> EffectiveRequest {
        synthesize(&self.doc, &self.state)
    }

    /// Compose and hand back the request. Transmitting it is the
    /// caller's concern; the session performs no I/O.
    pub fn submit(&self) -> EffectiveRequest {
        let request = self.effective_request();
        log::info!("composed {} {}", request.method, request.url);
        request
    }

    fn publish(&mut self) {
        let request = synthesize(&self.doc, &self.state);
        for observer in &mut self.observers {
            observer(&request);
        }
    }

    // Mirror the state's value maps into the slot set so presentation
    // layers reading slots see the merged values.
    fn sync_slot_values(&mut self) {
        for slot in self.slots.iter_mut() {
            let value = match slot.location {
                SlotLocation::Path => self.state.path_values.get(&slot.name).cloned(),
                SlotLocation::Query => self.state.query_values.get(&slot.name).cloned(),
                SlotLocation::Body => self.state.body_values.get(&slot.name).map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
            };
            slot.value = value.unwrap_or_default();
        }
    }
}
