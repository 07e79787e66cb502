//! Events emitted by actions.
//!
//! An action never mutates conversation state directly; it returns an
//! ordered list of deltas which the orchestrator appends to the transcript.
//! The union is closed and matched exhaustively wherever it is consumed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A state delta produced by an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Starts the named form, or ends the active one when `name` is `None`.
    #[serde(rename = "form")]
    Form { name: Option<String> },

    /// Sets a slot, or clears it when `value` is null.
    #[serde(rename = "slot")]
    SlotSet { name: String, value: Value },
}

impl Event {
    /// Activates a form.
    pub fn form(name: impl Into<String>) -> Self {
        Event::Form {
            name: Some(name.into()),
        }
    }

    /// Deactivates whichever form is active.
    pub fn form_end() -> Self {
        Event::Form { name: None }
    }

    /// Sets a slot value.
    pub fn slot(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Event::SlotSet {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Clears a slot.
    pub fn slot_reset(name: impl Into<String>) -> Self {
        Event::slot(name, Value::Null)
    }

    /// The event kind as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Form { .. } => "form",
            Event::SlotSet { .. } => "slot",
        }
    }

    /// Applies this event to a slot mapping. Form events leave slots alone.
    pub fn apply_to(&self, slots: &mut Map<String, Value>) {
        match self {
            Event::Form { .. } => {}
            Event::SlotSet { name, value } => {
                slots.insert(name.clone(), value.clone());
            }
        }
    }
}
