//! Dialogue module - read-only views of the conversation as of one turn.
//!
//! - `recognition` - NLU output for the latest user message (entities, intent)
//! - `tracker` - the full dialogue snapshot the orchestrator sends each turn
//!
//! Both are deserialized straight from the inbound payload and never mutated;
//! derived views are built eagerly at deserialization time.

mod recognition;
mod tracker;

pub use recognition::{Entity, IncomingMessage, Intent};
pub use tracker::{ActiveForm, Tracker, TranscriptEvent};

/// Reserved slot holding the name of the slot a form is waiting on.
pub const REQUESTED_SLOT: &str = "requested_slot";

/// Name of the orchestrator's built-in "wait for user input" action.
pub const ACTION_LISTEN: &str = "action_listen";
