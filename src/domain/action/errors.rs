//! Error types for running actions.

use crate::domain::foundation::ErrorCode;

/// Errors raised while dispatching or running an action.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    /// No value could be extracted for the requested slot. Recoverable: the
    /// orchestrator should fall back to its default policy for this turn.
    #[error("Failed to extract slot '{slot}' in action '{action}'")]
    Rejected { slot: String, action: String },

    #[error("Action '{0}' not found")]
    UnknownAction(String),

    #[error("Provided slot extractor type '{kind}' is not supported for slot '{slot}'")]
    UnsupportedExtractor { slot: String, kind: String },
}

impl ActionError {
    pub fn rejected(slot: impl Into<String>, action: impl Into<String>) -> Self {
        ActionError::Rejected {
            slot: slot.into(),
            action: action.into(),
        }
    }

    pub fn unsupported_extractor(slot: impl Into<String>, kind: impl Into<String>) -> Self {
        ActionError::UnsupportedExtractor {
            slot: slot.into(),
            kind: kind.into(),
        }
    }

    /// Returns true for the recoverable rejection case.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ActionError::Rejected { .. })
    }

    /// Returns true for configuration errors (unknown action, bad extractor).
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ActionError::UnknownAction(_) | ActionError::UnsupportedExtractor { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ActionError::Rejected { .. } => ErrorCode::SlotRejected,
            ActionError::UnknownAction(_) => ErrorCode::UnsupportedAction,
            ActionError::UnsupportedExtractor { .. } => ErrorCode::UnsupportedExtractor,
        }
    }
}
