//! Dialogue snapshot (tracker) sent by the orchestrator with every turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::recognition::IncomingMessage;
use super::REQUESTED_SLOT;
use crate::domain::events::Event;
use crate::domain::foundation::null_as_default;

/// Marker describing which form, if any, is currently collecting slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    validate: Option<bool>,
    #[serde(default)]
    rejected: Option<bool>,
    #[serde(default)]
    trigger_message: Option<IncomingMessage>,
}

impl ActiveForm {
    /// Creates a marker for the named form with default flags.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Sets the validate flag.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Form name; empty when no form is active.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether user input should be validated. Defaults to true.
    pub fn validate(&self) -> bool {
        self.validate.unwrap_or(true)
    }

    pub fn rejected(&self) -> bool {
        self.rejected.unwrap_or(false)
    }

    /// The message that triggered the form, if the orchestrator sent it.
    pub fn trigger_message(&self) -> Option<&IncomingMessage> {
        self.trigger_message.as_ref()
    }

    pub fn has_name(&self) -> bool {
        !self.name().is_empty()
    }
}

/// One entry of the conversation transcript.
///
/// Only the kind and metadata are interpreted; every other field is kept
/// verbatim so the snapshot can be re-serialized without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TranscriptEvent {
    /// Returns true if this is a user utterance event.
    pub fn is_user(&self) -> bool {
        self.event == "user"
    }
}

/// Read-only view of the conversation state for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    sender_id: Option<String>,
    #[serde(default)]
    latest_input_channel: Option<String>,
    #[serde(default)]
    latest_action_name: Option<String>,
    #[serde(default)]
    followup_action: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    paused: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    slots: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    events: Vec<TranscriptEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    latest_message: IncomingMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    active_form: ActiveForm,
}

impl Tracker {
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }

    pub fn latest_input_channel(&self) -> Option<&str> {
        self.latest_input_channel.as_deref()
    }

    /// Name of the last action the orchestrator executed.
    pub fn latest_action_name(&self) -> Option<&str> {
        self.latest_action_name.as_deref()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn slots(&self) -> &Map<String, Value> {
        &self.slots
    }

    pub fn events(&self) -> &[TranscriptEvent] {
        &self.events
    }

    pub fn latest_message(&self) -> &IncomingMessage {
        &self.latest_message
    }

    pub fn active_form(&self) -> &ActiveForm {
        &self.active_form
    }

    pub fn has_active_form(&self) -> bool {
        self.active_form.has_name()
    }

    /// Returns true if the named form is the one currently active.
    pub fn is_form_active(&self, form_name: &str) -> bool {
        self.has_active_form() && self.active_form.name() == form_name
    }

    /// Value of a slot; `None` when the slot is absent or null.
    pub fn slot_value(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).filter(|v| !v.is_null())
    }

    /// Value of the first entity of the given type in the latest message.
    pub fn entity_value(&self, entity_type: &str) -> Option<&Value> {
        self.latest_message.entity_value(entity_type)
    }

    /// The slot the active form is waiting on, if any.
    pub fn requested_slot(&self) -> Option<&str> {
        self.slot_value(REQUESTED_SLOT).and_then(Value::as_str)
    }

    /// Metadata attached to the most recent user event, or an empty object.
    pub fn metadata(&self) -> Map<String, Value> {
        self.events
            .iter()
            .rev()
            .find(|e| e.is_user())
            .and_then(|e| e.metadata.clone())
            .unwrap_or_default()
    }

    /// Returns a copy of this snapshot with the slot events applied in order.
    ///
    /// The original snapshot is untouched.
    pub fn with_events_applied(&self, events: &[Event]) -> Tracker {
        let mut updated = self.clone();
        for event in events {
            event.apply_to(&mut updated.slots);
        }
        updated
    }

    /// Adds or replaces a slot value.
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn with_latest_message(mut self, message: IncomingMessage) -> Self {
        self.latest_message = message;
        self
    }

    pub fn with_latest_action(mut self, action: impl Into<String>) -> Self {
        self.latest_action_name = Some(action.into());
        self
    }

    pub fn with_active_form(mut self, active_form: ActiveForm) -> Self {
        self.active_form = active_form;
        self
    }

    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }
}
