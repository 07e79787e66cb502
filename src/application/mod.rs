//! Application layer - services and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The form engine stays synchronous; everything that touches the document
//! store lives here.

pub mod handlers;
mod responses_service;

pub use handlers::{
    ActionResponse, GenerateResponseCommand, GenerateResponseHandler, RunActionHandler,
    WebhookError,
};
pub use responses_service::{ResponsesError, ResponsesService};
