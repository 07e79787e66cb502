//! Action module - what the orchestrator can ask this server to run.
//!
//! # Architecture
//!
//! - **Action**: trait implemented by every runnable action (forms included)
//! - **ActionRequest**: the inbound per-turn payload
//! - **ActionResult**: assembles template selections and the final event list
//! - **ActionRegistry**: dispatches a request to the action it names
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ActionRegistry::new();
//! registry.register(FormEngine::new(OpenIncidentForm::new()))?;
//!
//! let outcome = registry.dispatch(&request)?;
//! ```

mod errors;
mod registry;
mod request;
mod result;

pub use errors::ActionError;
pub use registry::ActionRegistry;
pub use request::ActionRequest;
pub use result::{ActionOutcome, ActionResult};

/// A named, runnable action.
///
/// Implementations are pure with respect to conversation state: they read the
/// snapshot in the request and describe changes as events.
pub trait Action: Send + Sync {
    /// The name the orchestrator uses to invoke this action.
    fn name(&self) -> &str;

    /// Runs the action for one turn.
    fn run(&self, request: &ActionRequest) -> Result<ActionOutcome, ActionError>;
}
