//! Inbound per-turn payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::dialogue::Tracker;
use crate::domain::foundation::null_as_default;

/// Request sent by the orchestrator to run one action for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Name of the action to run.
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_action: String,

    #[serde(default)]
    pub sender_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tracker: Tracker,

    /// Static domain description; passed through untouched.
    #[serde(default)]
    pub domain: Value,

    /// Version of the orchestrator that sent the request.
    #[serde(default)]
    pub version: Option<String>,
}

impl ActionRequest {
    pub fn new(next_action: impl Into<String>, tracker: Tracker) -> Self {
        Self {
            next_action: next_action.into(),
            sender_id: tracker.sender_id().map(str::to_string),
            tracker,
            ..Default::default()
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}
