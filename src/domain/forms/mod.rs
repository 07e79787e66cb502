//! Concrete forms served by this action server.

mod declarative;
mod incident;

pub use declarative::{DeclarativeForm, FormDefinition, FormDefinitionError, SlotChoices};
pub use incident::{OpenIncidentForm, PRIORITIES};
