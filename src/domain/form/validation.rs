//! Slot validation outcomes.

use serde_json::Value;

/// Result of validating one candidate slot value.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValidation {
    /// Commit this value, possibly transformed from the candidate.
    Accept(Value),

    /// Clear the slot so it is requested again, optionally telling the user why.
    Reject { template: Option<String> },
}

impl SlotValidation {
    pub fn accept(value: impl Into<Value>) -> Self {
        SlotValidation::Accept(value.into())
    }

    pub fn reject() -> Self {
        SlotValidation::Reject { template: None }
    }

    /// Rejects and selects a response template explaining the rejection.
    pub fn reject_with(template: impl Into<String>) -> Self {
        SlotValidation::Reject {
            template: Some(template.into()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SlotValidation::Accept(_))
    }
}
