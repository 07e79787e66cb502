//! The capability set a concrete form provides to the engine.

use serde_json::Value;

use super::{SlotExtractor, SlotValidation};
use crate::domain::action::{ActionError, ActionResult};
use crate::domain::dialogue::Tracker;
use crate::domain::events::Event;

/// A concrete form: which slots it needs, how to fill them, and what to do
/// once they are all filled.
///
/// The engine never branches on form identity; everything form specific
/// goes through this trait.
pub trait FormAction: Send + Sync {
    /// Unique form name, also the action name the orchestrator invokes.
    fn name(&self) -> &str;

    /// Slots the form still needs, in the order they should be requested.
    ///
    /// Computed against the given snapshot, so it may depend on slots that
    /// are already filled.
    fn required_slots(&self, tracker: &Tracker) -> Vec<String>;

    /// Extraction rules for a slot, tried in order.
    ///
    /// Defaults to a single entity rule bound to an entity named like the slot.
    fn slot_mappings(&self, slot: &str) -> Vec<SlotExtractor> {
        vec![SlotExtractor::from_entity(slot)]
    }

    /// Validates a candidate value before it is committed. Accepts everything
    /// unchanged by default.
    fn validate_slot(&self, slot: &str, value: Value, tracker: &Tracker) -> SlotValidation {
        let _ = (slot, tracker);
        SlotValidation::Accept(value)
    }

    /// Called once all required slots are filled, with the updated snapshot.
    ///
    /// May select templates and return extra events; the engine appends the
    /// deactivation events after them.
    fn submit(&self, tracker: &Tracker, result: &mut ActionResult)
        -> Result<Vec<Event>, ActionError>;
}
