//! Forms described entirely by data.
//!
//! A [`FormDefinition`] is usually written in YAML:
//!
//! ```yaml
//! name: hardware_request_form
//! required_slots: [device, reason]
//! mappings:
//!   device:
//!     - type: from_entity
//!       entity: device
//!   reason:
//!     - type: from_text
//!       not_intent: [deny]
//! choices:
//!   device:
//!     values: [laptop, monitor]
//!     reject_template: utter_unknown_device
//! submit_template: utter_request_sent
//! reset_on_submit: true
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::action::{ActionError, ActionResult};
use crate::domain::dialogue::{Tracker, REQUESTED_SLOT};
use crate::domain::events::Event;
use crate::domain::form::{FormAction, SlotExtractor, SlotValidation};
use crate::domain::foundation::ValidationError;

/// Errors raised while loading a form definition.
#[derive(Debug, thiserror::Error)]
pub enum FormDefinitionError {
    #[error("Failed to read form definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse form definition '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid form definition '{name}': {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Closed set of accepted values for a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotChoices {
    /// Accepted values, compared case-insensitively and stored lowercased.
    pub values: Vec<String>,

    #[serde(default)]
    pub reject_template: Option<String>,
}

/// Data description of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDefinition {
    pub name: String,

    pub required_slots: Vec<String>,

    /// Extraction rules per slot. Slots without rules read the entity of the
    /// same name.
    #[serde(default)]
    pub mappings: BTreeMap<String, Vec<SlotExtractor>>,

    #[serde(default)]
    pub choices: BTreeMap<String, SlotChoices>,

    /// Template selected when the form is submitted.
    #[serde(default)]
    pub submit_template: Option<String>,

    /// Clear every required slot on submit.
    #[serde(default)]
    pub reset_on_submit: bool,
}

impl FormDefinition {
    /// Parses and validates a YAML definition. `origin` names the source in
    /// error messages.
    pub fn from_yaml(origin: &str, yaml: &str) -> Result<Self, FormDefinitionError> {
        let definition: FormDefinition =
            serde_yaml::from_str(yaml).map_err(|source| FormDefinitionError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        definition
            .validate()
            .map_err(|source| FormDefinitionError::Invalid {
                name: definition.name.clone(),
                source,
            })?;

        Ok(definition)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.required_slots.is_empty() {
            return Err(ValidationError::empty_field("required_slots"));
        }

        let mut seen = HashSet::new();
        for slot in &self.required_slots {
            if slot.trim().is_empty() {
                return Err(ValidationError::empty_field("required_slots"));
            }
            if slot == REQUESTED_SLOT {
                return Err(ValidationError::invalid_format(
                    "required_slots",
                    format!("'{}' is reserved", REQUESTED_SLOT),
                ));
            }
            if !seen.insert(slot.as_str()) {
                return Err(ValidationError::duplicate("required_slots", slot));
            }
        }

        let unknown = self
            .mappings
            .keys()
            .chain(self.choices.keys())
            .find(|slot| !seen.contains(slot.as_str()));
        if let Some(slot) = unknown {
            return Err(ValidationError::invalid_format(
                "mappings",
                format!("'{}' is not a required slot", slot),
            ));
        }

        Ok(())
    }
}

/// A [`FormAction`] driven by a [`FormDefinition`].
#[derive(Debug, Clone)]
pub struct DeclarativeForm {
    definition: FormDefinition,
}

impl DeclarativeForm {
    pub fn new(definition: FormDefinition) -> Self {
        Self { definition }
    }
}

impl FormAction for DeclarativeForm {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn required_slots(&self, _tracker: &Tracker) -> Vec<String> {
        self.definition.required_slots.clone()
    }

    fn slot_mappings(&self, slot: &str) -> Vec<SlotExtractor> {
        match self.definition.mappings.get(slot) {
            Some(rules) if !rules.is_empty() => rules.clone(),
            _ => vec![SlotExtractor::from_entity(slot)],
        }
    }

    fn validate_slot(&self, slot: &str, value: Value, _tracker: &Tracker) -> SlotValidation {
        let Some(choices) = self.definition.choices.get(slot) else {
            return SlotValidation::Accept(value);
        };

        let candidate = value.as_str().map(str::to_lowercase);
        match candidate {
            Some(c) if choices.values.iter().any(|v| v.to_lowercase() == c) => {
                SlotValidation::accept(c)
            }
            _ => SlotValidation::Reject {
                template: choices.reject_template.clone(),
            },
        }
    }

    fn submit(
        &self,
        _tracker: &Tracker,
        result: &mut ActionResult,
    ) -> Result<Vec<Event>, ActionError> {
        if let Some(template) = &self.definition.submit_template {
            result.add_template(template.clone());
        }

        if !self.definition.reset_on_submit {
            return Ok(Vec::new());
        }

        Ok(self
            .definition
            .required_slots
            .iter()
            .map(Event::slot_reset)
            .collect())
    }
}
