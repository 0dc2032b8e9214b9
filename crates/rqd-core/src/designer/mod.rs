pub mod resolver;
pub mod rules;
pub mod session;
pub mod slots;
pub mod state;
pub mod synth;

pub use resolver::{BodyField, body_fields, path_parameters, query_parameters, resolve};
pub use rules::{Rule, rules_for_field, rules_for_parameter, violations};
pub use session::Session;
pub use slots::{Slot, SlotLocation, SlotSet};
pub use state::{DesignerState, StatePatch};
pub use synth::{EffectiveRequest, synthesize};
