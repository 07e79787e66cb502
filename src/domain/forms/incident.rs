//! Form that collects the details needed to open an IT incident.

use serde_json::Value;

use crate::domain::action::{ActionError, ActionResult};
use crate::domain::dialogue::Tracker;
use crate::domain::events::Event;
use crate::domain::form::{FormAction, SlotExtractor, SlotValidation};

/// Priorities an incident can be opened with.
pub const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

const TITLE: &str = "incident_title";
const DESCRIPTION: &str = "problem_description";
const PRIORITY: &str = "priority";
const CONFIRM: &str = "confirm";

/// Intents whose text must never be taken as a title or description.
const NOT_FREE_TEXT: [&str; 5] = ["incident_status", "bot_challenge", "help", "affirm", "deny"];

#[derive(Debug, Clone, Default)]
pub struct OpenIncidentForm;

impl OpenIncidentForm {
    pub const NAME: &'static str = "open_incident_form";

    pub fn new() -> Self {
        Self
    }
}

impl FormAction for OpenIncidentForm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_slots(&self, _tracker: &Tracker) -> Vec<String> {
        [TITLE, DESCRIPTION, PRIORITY, CONFIRM]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn slot_mappings(&self, slot: &str) -> Vec<SlotExtractor> {
        match slot {
            TITLE => vec![
                SlotExtractor::from_trigger_intent("Problem resetting password")
                    .with_intents(["password_reset"]),
                SlotExtractor::from_trigger_intent("Problem with email")
                    .with_intents(["problem_email"]),
                SlotExtractor::from_text().without_intents(NOT_FREE_TEXT),
            ],
            DESCRIPTION => vec![SlotExtractor::from_text().without_intents(NOT_FREE_TEXT)],
            CONFIRM => vec![
                SlotExtractor::from_intent(true).with_intents(["affirm"]),
                SlotExtractor::from_intent(false).with_intents(["deny"]),
            ],
            _ => vec![SlotExtractor::from_entity(slot)],
        }
    }

    fn validate_slot(&self, slot: &str, value: Value, _tracker: &Tracker) -> SlotValidation {
        if slot != PRIORITY {
            return SlotValidation::Accept(value);
        }

        let normalized = value.as_str().map(str::to_lowercase);
        match normalized {
            Some(p) if PRIORITIES.contains(&p.as_str()) => SlotValidation::accept(p),
            _ => SlotValidation::reject_with("utter_no_priority"),
        }
    }

    fn submit(
        &self,
        tracker: &Tracker,
        result: &mut ActionResult,
    ) -> Result<Vec<Event>, ActionError> {
        let confirmed = tracker
            .slot_value(CONFIRM)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if confirmed {
            result.add_template("utter_incident_created");
        } else {
            result.add_template("utter_incident_creation_canceled");
        }

        Ok(self
            .required_slots(tracker)
            .into_iter()
            .map(Event::slot_reset)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{ActiveForm, Entity, IncomingMessage, Intent, ACTION_LISTEN, REQUESTED_SLOT};
    use crate::domain::form::FormEngine;

    fn engine() -> FormEngine<OpenIncidentForm> {
        FormEngine::new(OpenIncidentForm::new())
    }

    fn user_says(intent: &str, text: &str, entities: Vec<Entity>) -> IncomingMessage {
        IncomingMessage {
            text: Some(text.to_string()),
            intent: Intent::new(intent, 0.97),
            entities,
        }
    }

    fn waiting_for(slot: &str, message: IncomingMessage) -> Tracker {
        Tracker::default()
            .with_active_form(ActiveForm::named(OpenIncidentForm::NAME))
            .with_latest_action(ACTION_LISTEN)
            .with_slot(REQUESTED_SLOT, slot)
            .with_latest_message(message)
    }

    #[test]
    fn starts_by_asking_for_title() {
        let tracker = Tracker::default()
            .with_latest_message(user_says("password_reset", "I can't log in", vec![]));

        let outcome = engine().run_turn(&tracker).unwrap();

        assert_eq!(
            outcome.events,
            vec![
                Event::form(OpenIncidentForm::NAME),
                Event::slot(REQUESTED_SLOT, TITLE),
            ]
        );
        assert_eq!(outcome.templates, vec!["utter_ask_incident_title".to_string()]);
    }

    #[test]
    fn title_comes_from_free_text() {
        let tracker = waiting_for(TITLE, user_says("inform", "VPN keeps dropping", vec![]));

        let outcome = engine().run_turn(&tracker).unwrap();

        assert_eq!(outcome.events[0], Event::slot(TITLE, "VPN keeps dropping"));
        assert_eq!(outcome.events[1], Event::slot(REQUESTED_SLOT, DESCRIPTION));
    }

    #[test]
    fn excluded_intent_text_is_rejected() {
        let tracker = waiting_for(DESCRIPTION, user_says("help", "what can you do", vec![]))
            .with_slot(TITLE, "VPN");

        let err = engine().run_turn(&tracker).unwrap_err();

        assert_eq!(err, ActionError::rejected(DESCRIPTION, OpenIncidentForm::NAME));
    }

    #[test]
    fn trigger_intent_on_requested_title_is_unsupported() {
        let tracker = waiting_for(TITLE, user_says("problem_email", "email is down", vec![]));
        let err = engine().run_turn(&tracker).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn priority_is_normalized() {
        let tracker = waiting_for(
            PRIORITY,
            user_says("inform", "High", vec![Entity::new(PRIORITY, "High")]),
        );

        let outcome = engine().run_turn(&tracker).unwrap();

        assert_eq!(outcome.events[0], Event::slot(PRIORITY, "high"));
    }

    #[test]
    fn unknown_priority_is_cleared_with_explanation() {
        let tracker = waiting_for(
            PRIORITY,
            user_says("inform", "critical", vec![Entity::new(PRIORITY, "critical")]),
        )
        .with_slot(TITLE, "VPN")
        .with_slot(DESCRIPTION, "drops every hour");

        let outcome = engine().run_turn(&tracker).unwrap();

        assert_eq!(outcome.events[0], Event::slot_reset(PRIORITY));
        assert_eq!(
            outcome.templates,
            vec!["utter_no_priority".to_string(), "utter_ask_priority".to_string()]
        );
    }

    #[test]
    fn priority_entity_fills_while_other_slot_requested() {
        let tracker = waiting_for(
            DESCRIPTION,
            user_says("inform", "laptop won't boot, low", vec![Entity::new(PRIORITY, "low")]),
        )
        .with_slot(TITLE, "Laptop");

        let outcome = engine().run_turn(&tracker).unwrap();

        assert_eq!(outcome.events[0], Event::slot(PRIORITY, "low"));
        assert_eq!(outcome.events[1], Event::slot(DESCRIPTION, "laptop won't boot, low"));
        assert_eq!(outcome.events[2], Event::slot(REQUESTED_SLOT, CONFIRM));
    }

    fn ready_to_confirm(intent: &str) -> Tracker {
        waiting_for(CONFIRM, user_says(intent, "sure", vec![]))
            .with_slot(TITLE, "VPN")
            .with_slot(DESCRIPTION, "drops every hour")
            .with_slot(PRIORITY, "medium")
    }

    #[test]
    fn affirm_creates_incident_and_clears_slots() {
        let outcome = engine().run_turn(&ready_to_confirm("affirm")).unwrap();

        assert_eq!(outcome.templates, vec!["utter_incident_created".to_string()]);
        assert_eq!(outcome.events[0], Event::slot(CONFIRM, true));
        assert_eq!(
            &outcome.events[1..],
            &[
                Event::slot_reset(TITLE),
                Event::slot_reset(DESCRIPTION),
                Event::slot_reset(PRIORITY),
                Event::slot_reset(CONFIRM),
                Event::form_end(),
                Event::slot_reset(REQUESTED_SLOT),
            ]
        );
    }

    #[test]
    fn deny_cancels_incident() {
        let outcome = engine().run_turn(&ready_to_confirm("deny")).unwrap();

        assert_eq!(outcome.events[0], Event::slot(CONFIRM, false));
        assert_eq!(
            outcome.templates,
            vec!["utter_incident_creation_canceled".to_string()]
        );
    }
}
