//! Command handlers.

mod generate_response;
mod run_action;

pub use generate_response::{GenerateResponseCommand, GenerateResponseHandler};
pub use run_action::{ActionResponse, RunActionHandler, WebhookError};
