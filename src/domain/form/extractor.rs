//! Slot extraction rules.
//!
//! Each required slot has an ordered list of [`SlotExtractor`]s. An extractor
//! combines a [`SlotMapping`] (where the value comes from) with intent gating
//! (which intents it listens to).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::action::ActionError;
use crate::domain::dialogue::Tracker;

/// Where a slot value is taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SlotMapping {
    /// Value of the first entity of the bound type.
    #[serde(rename = "from_entity")]
    Entity { entity: String },

    /// A fixed value, assigned when the gating intent matches.
    #[serde(rename = "from_intent")]
    Intent { value: Value },

    /// The raw text of the user's utterance.
    #[serde(rename = "from_text")]
    Text,

    /// A fixed value assigned by the intent that starts the form. Only valid
    /// while deciding which form to start, never for the requested slot.
    #[serde(rename = "from_trigger_intent")]
    TriggerIntent { value: Value },
}

impl SlotMapping {
    /// Wire name of the mapping kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SlotMapping::Entity { .. } => "from_entity",
            SlotMapping::Intent { .. } => "from_intent",
            SlotMapping::Text => "from_text",
            SlotMapping::TriggerIntent { .. } => "from_trigger_intent",
        }
    }
}

/// One extraction rule for a slot.
///
/// Parsed strictly: unknown keys, and keys that do not belong to the rule's
/// `type`, are errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSlotExtractor")]
pub struct SlotExtractor {
    #[serde(flatten)]
    mapping: SlotMapping,

    /// Intents this rule listens to. Empty means "any intent not denied".
    #[serde(rename = "intent", skip_serializing_if = "Vec::is_empty")]
    intents: Vec<String>,

    /// Intents this rule ignores. Only consulted when `intents` is empty.
    #[serde(rename = "not_intent", skip_serializing_if = "Vec::is_empty")]
    not_intents: Vec<String>,
}

impl SlotExtractor {
    pub fn new(mapping: SlotMapping) -> Self {
        Self {
            mapping,
            intents: Vec::new(),
            not_intents: Vec::new(),
        }
    }

    pub fn from_entity(entity: impl Into<String>) -> Self {
        Self::new(SlotMapping::Entity {
            entity: entity.into(),
        })
    }

    pub fn from_intent(value: impl Into<Value>) -> Self {
        Self::new(SlotMapping::Intent {
            value: value.into(),
        })
    }

    pub fn from_text() -> Self {
        Self::new(SlotMapping::Text)
    }

    pub fn from_trigger_intent(value: impl Into<Value>) -> Self {
        Self::new(SlotMapping::TriggerIntent {
            value: value.into(),
        })
    }

    /// Restricts the rule to the given intents.
    pub fn with_intents<I, S>(mut self, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intents = intents.into_iter().map(Into::into).collect();
        self
    }

    /// Makes the rule ignore the given intents.
    pub fn without_intents<I, S>(mut self, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_intents = intents.into_iter().map(Into::into).collect();
        self
    }

    pub fn mapping(&self) -> &SlotMapping {
        &self.mapping
    }

    pub fn intents(&self) -> &[String] {
        &self.intents
    }

    pub fn not_intents(&self) -> &[String] {
        &self.not_intents
    }

    /// Entity type this rule is bound to, for entity rules.
    pub fn entity(&self) -> Option<&str> {
        match &self.mapping {
            SlotMapping::Entity { entity } => Some(entity),
            _ => None,
        }
    }

    /// Fixed value of intent and trigger-intent rules.
    pub fn intent_value(&self) -> Option<&Value> {
        match &self.mapping {
            SlotMapping::Intent { value } | SlotMapping::TriggerIntent { value } => Some(value),
            _ => None,
        }
    }

    /// Intent gating.
    ///
    /// Applies when the allow-list is empty and the intent is not denied, or
    /// when the intent is explicitly allowed.
    pub fn applies_to(&self, intent: Option<&str>) -> bool {
        let listed = |list: &[String]| intent.is_some_and(|i| list.iter().any(|l| l == i));
        (self.intents.is_empty() && !listed(&self.not_intents)) || listed(&self.intents)
    }

    /// Resolves a value for the slot the form is currently requesting.
    ///
    /// Returns `Ok(None)` when the rule does not apply to the latest intent or
    /// yields nothing. Trigger-intent rules are not allowed here.
    pub fn extract_requested(
        &self,
        slot: &str,
        tracker: &Tracker,
    ) -> Result<Option<Value>, ActionError> {
        if !self.applies_to(tracker.latest_message().intent_name()) {
            return Ok(None);
        }

        let value = match &self.mapping {
            SlotMapping::Entity { entity } => tracker.entity_value(entity).cloned(),
            SlotMapping::Intent { value } => Some(value.clone()),
            SlotMapping::Text => tracker.latest_message().text.clone().map(Value::String),
            SlotMapping::TriggerIntent { .. } => {
                return Err(ActionError::unsupported_extractor(slot, self.mapping.kind()));
            }
        };

        Ok(value.filter(|v| !v.is_null()))
    }
}

/// Wire shape of a [`SlotExtractor`], before the kind-specific checks.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSlotExtractor {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    entity: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default, rename = "intent", deserialize_with = "one_or_many")]
    intents: Vec<String>,
    #[serde(default, rename = "not_intent", deserialize_with = "one_or_many")]
    not_intents: Vec<String>,
}

impl TryFrom<RawSlotExtractor> for SlotExtractor {
    type Error = String;

    fn try_from(raw: RawSlotExtractor) -> Result<Self, Self::Error> {
        let RawSlotExtractor {
            kind,
            entity,
            value,
            intents,
            not_intents,
        } = raw;

        let mapping = match (kind.as_str(), entity, value) {
            ("from_entity", Some(entity), None) => SlotMapping::Entity { entity },
            ("from_intent", None, Some(value)) => SlotMapping::Intent { value },
            ("from_text", None, None) => SlotMapping::Text,
            ("from_trigger_intent", None, Some(value)) => SlotMapping::TriggerIntent { value },
            ("from_entity", None, _) => return Err("'from_entity' requires 'entity'".to_string()),
            ("from_intent" | "from_trigger_intent", _, None) => {
                return Err(format!("'{}' requires 'value'", kind))
            }
            ("from_entity" | "from_intent" | "from_text" | "from_trigger_intent", _, _) => {
                return Err(format!("unexpected field for '{}'", kind))
            }
            _ => return Err(format!("unknown slot mapping type '{}'", kind)),
        };

        Ok(SlotExtractor {
            mapping,
            intents,
            not_intents,
        })
    }
}

/// Accepts either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}
