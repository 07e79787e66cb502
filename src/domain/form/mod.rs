//! Form module - multi-turn slot filling.
//!
//! A form repeatedly asks the user for a fixed set of required slots until
//! all of them are filled, then submits.
//!
//! - `extractor` - declarative rules describing where a slot value may come from
//! - `validation` - outcome of the per-slot validation hook
//! - `form_action` - the capability set a concrete form provides
//! - `engine` - the per-turn algorithm, generic over any [`FormAction`]

mod engine;
mod extractor;
mod form_action;
mod validation;

pub use engine::{FormEngine, DEFAULT_ASK_TEMPLATE_PREFIX};
pub use extractor::{SlotExtractor, SlotMapping};
pub use form_action::FormAction;
pub use validation::SlotValidation;
