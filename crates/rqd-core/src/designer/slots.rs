use serde_json::Value;

use super::resolver::{body_fields, path_parameters, query_parameters};
use super::rules::{Rule, rules_for_field, rules_for_parameter};
use crate::parse::operation::Operation;
use crate::parse::schema::SchemaType;

/// Where a slot's value ends up in the synthesized request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotLocation {
    Path,
    Query,
    Body,
}

/// One addressable, user-editable input unit for the resolved operation.
/// Identity is `(location, name)` and is stable within one operation, so
/// a presentation layer can correlate widget instances to slots across
/// re-renders without a full remount.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub location: SlotLocation,
    pub name: String,
    /// Raw user input; coercion happens at synthesis time, if at all.
    pub value: String,
    pub rules: Vec<Rule>,
    pub value_type: Option<SchemaType>,
    pub enum_values: Vec<Value>,
    pub description: Option<String>,
}

/// The full slot complement for one resolved operation. Rebuilt by total
/// replacement whenever the selection changes; slots from the previous
/// operation never survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotSet {
    slots: Vec<Slot>,
}

impl SlotSet {
    /// Build the slot set for an operation: one empty-valued slot per
    /// path parameter, query parameter, and body field, in declaration
    /// order. `None` (no operation resolved) yields zero slots.
    pub fn rebuild(operation: Option<&Operation>) -> SlotSet {
        let Some(op) = operation else {
            return SlotSet::default();
        };

        let mut slots = Vec::new();

        for param in path_parameters(op) {
            slots.push(Slot {
                location: SlotLocation::Path,
                name: param.name.clone(),
                value: String::new(),
                rules: rules_for_parameter(param),
                value_type: param
                    .schema
                    .as_ref()
                    .and_then(|s| s.as_schema())
                    .and_then(|s| s.schema_type),
                enum_values: param
                    .schema
                    .as_ref()
                    .and_then(|s| s.as_schema())
                    .map(|s| s.enum_values.clone())
                    .unwrap_or_default(),
                description: param.description.clone(),
            });
        }

        for param in query_parameters(op) {
            slots.push(Slot {
                location: SlotLocation::Query,
                name: param.name.clone(),
                value: String::new(),
                rules: rules_for_parameter(param),
                value_type: param
                    .schema
                    .as_ref()
                    .and_then(|s| s.as_schema())
                    .and_then(|s| s.schema_type),
                enum_values: param
                    .schema
                    .as_ref()
                    .and_then(|s| s.as_schema())
                    .map(|s| s.enum_values.clone())
                    .unwrap_or_default(),
                description: param.description.clone(),
            });
        }

        for field in body_fields(op) {
            slots.push(Slot {
                location: SlotLocation::Body,
                name: field.name.clone(),
                value: String::new(),
                rules: rules_for_field(&field),
                value_type: field.field_type,
                enum_values: field.enum_values,
                description: field.description,
            });
        }

        SlotSet { slots }
    }

    pub fn get(&self, location: SlotLocation, name: &str) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|s| s.location == location && s.name == name)
    }

    pub fn get_mut(&mut self, location: SlotLocation, name: &str) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|s| s.location == location && s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Slots for one location, in declaration order.
    pub fn in_location(&self, location: SlotLocation) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |s| s.location == location)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
