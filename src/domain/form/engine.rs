//! The per-turn form-filling algorithm.
//!
//! One call to [`FormEngine::run_turn`] takes a dialogue snapshot and returns
//! the ordered events and template selections for that turn:
//!
//! 1. Activate the form, or continue it if it is already active
//! 2. Extract and validate slots from the latest user input
//! 3. Request the next missing slot, or submit and deactivate
//!
//! The engine keeps no state between calls; every derived slot mapping is a
//! copy of the snapshot.

use serde_json::Value;
use tracing::debug;

use super::{FormAction, SlotMapping, SlotValidation};
use crate::domain::action::{Action, ActionError, ActionOutcome, ActionRequest, ActionResult};
use crate::domain::dialogue::{Tracker, ACTION_LISTEN, REQUESTED_SLOT};
use crate::domain::events::Event;

/// Default prefix for the template that asks the user for a slot.
pub const DEFAULT_ASK_TEMPLATE_PREFIX: &str = "utter_ask_";

/// Runs a [`FormAction`] as a registered action.
#[derive(Debug, Clone)]
pub struct FormEngine<F> {
    form: F,
    ask_template_prefix: String,
}

impl<F: FormAction> FormEngine<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            ask_template_prefix: DEFAULT_ASK_TEMPLATE_PREFIX.to_string(),
        }
    }

    /// Overrides the prefix used to build "ask" template names.
    pub fn with_ask_template_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ask_template_prefix = prefix.into();
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn ask_template_prefix(&self) -> &str {
        &self.ask_template_prefix
    }

    /// Runs one dialogue turn.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the requested slot could not be extracted
    /// - `UnsupportedExtractor` if a trigger-intent rule is applied to the
    ///   requested slot
    /// - anything the form's submit hook returns
    pub fn run_turn(&self, tracker: &Tracker) -> Result<ActionOutcome, ActionError> {
        let mut result = ActionResult::new();

        let mut events = self.activate(tracker, &mut result);
        events.extend(self.validate(tracker, &mut result)?);

        let updated = tracker.with_events_applied(&events);
        match self.request_next_slot(&updated, &mut result) {
            Some(event) => events.push(event),
            None => {
                events.extend(self.form.submit(&updated, &mut result)?);
                events.extend(deactivate());
                debug!("{} form submitted", self.form.name());
            }
        }

        Ok(result.finish(events))
    }

    fn activate(&self, tracker: &Tracker, result: &mut ActionResult) -> Vec<Event> {
        let name = self.form.name();
        if tracker.is_form_active(name) {
            debug!("{} form is already active", name);
            return Vec::new();
        }

        debug!("{} form has been activated", name);
        let mut events = vec![Event::form(name)];

        let prefilled: Vec<(String, Value)> = self
            .form
            .required_slots(tracker)
            .into_iter()
            .filter_map(|slot| {
                let value = tracker.slot_value(&slot)?.clone();
                Some((slot, value))
            })
            .collect();

        events.extend(self.validate_slots(prefilled, tracker, result));
        events
    }

    fn validate(
        &self,
        tracker: &Tracker,
        result: &mut ActionResult,
    ) -> Result<Vec<Event>, ActionError> {
        if tracker.latest_action_name() != Some(ACTION_LISTEN) {
            return Ok(Vec::new());
        }
        if !tracker.is_form_active(self.form.name()) || !tracker.active_form().validate() {
            return Ok(Vec::new());
        }

        let mut slots: Vec<(String, Value)> = self.extract_other_slots(tracker).into_iter().collect();

        if let Some(requested) = tracker.requested_slot() {
            if let Some(value) = self.extract_requested_slot(requested, tracker)? {
                slots.push((requested.to_string(), value));
            }

            if slots.is_empty() {
                return Err(ActionError::rejected(requested, self.form.name()));
            }
        }

        Ok(self.validate_slots(slots, tracker, result))
    }

    /// Scans every required slot except the requested one. Only entity rules
    /// bound to an entity named like the slot, and trigger-intent rules, are
    /// considered. Stops at the first value found.
    fn extract_other_slots(&self, tracker: &Tracker) -> Option<(String, Value)> {
        let requested = tracker.requested_slot();
        let intent = tracker.latest_message().intent_name();
        // Always false while validation requires this form to be active.
        let trigger_allowed =
            !tracker.has_active_form() || tracker.active_form().name() != self.form.name();

        for slot in self.form.required_slots(tracker) {
            if Some(slot.as_str()) == requested {
                continue;
            }

            for extractor in self.form.slot_mappings(&slot) {
                if !extractor.applies_to(intent) {
                    continue;
                }

                let value = match extractor.mapping() {
                    SlotMapping::Entity { entity } if entity == &slot => {
                        tracker.entity_value(&slot).cloned()
                    }
                    SlotMapping::TriggerIntent { value } if trigger_allowed => Some(value.clone()),
                    _ => None,
                };

                if let Some(value) = value.filter(|v| !v.is_null()) {
                    debug!("{} slot value extracted: {}", slot, value);
                    return Some((slot, value));
                }
            }
        }

        None
    }

    fn extract_requested_slot(
        &self,
        slot: &str,
        tracker: &Tracker,
    ) -> Result<Option<Value>, ActionError> {
        debug!("Extracting value for {} slot", slot);

        for extractor in self.form.slot_mappings(slot) {
            if let Some(value) = extractor.extract_requested(slot, tracker)? {
                debug!("Extracted value {} for {} slot", value, slot);
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    /// Runs each candidate through the form's validator. Rejected slots are
    /// cleared so they get requested again.
    fn validate_slots(
        &self,
        slots: Vec<(String, Value)>,
        tracker: &Tracker,
        result: &mut ActionResult,
    ) -> Vec<Event> {
        slots
            .into_iter()
            .map(|(slot, value)| match self.form.validate_slot(&slot, value, tracker) {
                SlotValidation::Accept(value) => Event::slot(slot, value),
                SlotValidation::Reject { template } => {
                    debug!("{} slot value rejected", slot);
                    if let Some(template) = template {
                        result.add_template(template);
                    }
                    Event::slot_reset(slot)
                }
            })
            .collect()
    }

    fn request_next_slot(&self, tracker: &Tracker, result: &mut ActionResult) -> Option<Event> {
        let slot = self
            .form
            .required_slots(tracker)
            .into_iter()
            .find(|slot| tracker.slot_value(slot).is_none())?;

        debug!("Requesting '{}' slot", slot);
        result.add_template(format!("{}{}", self.ask_template_prefix, slot));
        Some(Event::slot(REQUESTED_SLOT, slot))
    }
}

fn deactivate() -> [Event; 2] {
    [Event::form_end(), Event::slot_reset(REQUESTED_SLOT)]
}

impl<F: FormAction> Action for FormEngine<F> {
    fn name(&self) -> &str {
        self.form.name()
    }

    fn run(&self, request: &ActionRequest) -> Result<ActionOutcome, ActionError> {
        self.run_turn(request.tracker())
    }
}
