//! HTTP adapters - the action webhook and the responses API.
//!
//! - `webhook` - `POST /webhook`
//! - `responses` - `POST /api/v1/responses/:bot_id`
//! - `router` - route assembly and middleware

mod error;
pub mod responses;
mod router;
pub mod webhook;

pub use error::{
    responses_error, storage_error, webhook_error, ErrorResponse, GENERIC_ERROR_MESSAGE,
};
pub use router::build_router;
