//! Result assembly for one action run.

use crate::domain::events::Event;

/// Collects template selections while an action runs.
///
/// Consumed by [`ActionResult::finish`], which attaches the final event list;
/// a result can therefore be finalized only once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResult {
    templates: Vec<String>,
}

impl ActionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a response template to send to the user.
    pub fn add_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.templates.push(template.into());
        self
    }

    /// Templates selected so far, in selection order.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Attaches the ordered event list and finalizes the result.
    pub fn finish(self, events: Vec<Event>) -> ActionOutcome {
        ActionOutcome {
            templates: self.templates,
            events,
        }
    }
}

/// Final output of an action: template names plus ordered events.
///
/// Template names still need resolving to response bodies before they are
/// sent back to the orchestrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub templates: Vec<String>,
    pub events: Vec<Event>,
}
