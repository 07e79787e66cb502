//! Action Registry - dispatches requests to registered actions by name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::{Action, ActionError, ActionOutcome, ActionRequest};
use crate::domain::foundation::ValidationError;

/// Central registry of runnable actions.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.action_names())
            .finish()
    }
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its own name.
    ///
    /// Fails if another action already uses that name.
    pub fn register<A: Action + 'static>(&mut self, action: A) -> Result<(), ValidationError> {
        self.register_shared(Arc::new(action))
    }

    /// Registers an already shared action.
    pub fn register_shared(&mut self, action: Arc<dyn Action>) -> Result<(), ValidationError> {
        let name = action.name().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("action.name"));
        }
        if self.actions.contains_key(&name) {
            return Err(ValidationError::duplicate("action.name", name));
        }

        info!("{} action registered", name);
        self.actions.insert(name, action);
        Ok(())
    }

    /// Gets an action by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs the action named by `request.next_action`.
    pub fn dispatch(&self, request: &ActionRequest) -> Result<ActionOutcome, ActionError> {
        let action = self
            .get(&request.next_action)
            .ok_or_else(|| ActionError::UnknownAction(request.next_action.clone()))?;

        action.run(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::Tracker;
    use crate::domain::events::Event;

    struct EchoAction {
        name: &'static str,
    }

    impl Action for EchoAction {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, request: &ActionRequest) -> Result<ActionOutcome, ActionError> {
            Ok(ActionOutcome {
                templates: vec![format!("utter_{}", self.name)],
                events: vec![Event::slot("sender", request.sender_id.clone())],
            })
        }
    }

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.register(EchoAction { name: "action_a" }).unwrap();
        registry.register(EchoAction { name: "action_b" }).unwrap();
        registry
    }

    #[test]
    fn dispatch_runs_named_action() {
        let request = ActionRequest::new("action_b", Tracker::default().with_sender("u-1"));

        let outcome = registry().dispatch(&request).unwrap();

        assert_eq!(outcome.templates, vec!["utter_action_b".to_string()]);
        assert_eq!(outcome.events, vec![Event::slot("sender", "u-1")]);
    }

    #[test]
    fn dispatch_unknown_action_is_unsupported() {
        let request = ActionRequest::new("action_missing", Tracker::default());

        let err = registry().dispatch(&request).unwrap_err();

        assert_eq!(err, ActionError::UnknownAction("action_missing".to_string()));
        assert!(err.is_unsupported());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = registry();
        let result = registry.register(EchoAction { name: "action_a" });
        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = ActionRegistry::new();
        let result = registry.register(EchoAction { name: "" });
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn action_names_are_sorted() {
        assert_eq!(registry().action_names(), vec!["action_a", "action_b"]);
        assert!(registry().has_action("action_a"));
        assert!(registry().get("action_c").is_none());
    }
}
