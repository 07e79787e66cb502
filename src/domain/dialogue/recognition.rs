//! Recognition model for the latest user message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::null_as_default;

/// An entity recognized in the user's utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    /// Entity type name (e.g. `priority`).
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Entity {
    /// Creates an entity with just a type and value.
    pub fn new(entity: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            entity: Some(entity.into()),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Returns true if this entity is of the given type.
    pub fn is(&self, entity_type: &str) -> bool {
        self.entity.as_deref() == Some(entity_type)
    }
}

/// The single intent recognized for the user's utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Intent {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: Some(name.into()),
            confidence: Some(confidence),
        }
    }
}

/// The latest user message as parsed by the upstream NLU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent: Intent,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,
}

impl IncomingMessage {
    /// Name of the recognized intent, if any.
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.name.as_deref()
    }

    /// Value of the first entity of the given type, skipping null values.
    pub fn entity_value(&self, entity_type: &str) -> Option<&Value> {
        self.entities
            .iter()
            .find(|e| e.is(entity_type))
            .map(|e| &e.value)
            .filter(|v| !v.is_null())
    }
}
