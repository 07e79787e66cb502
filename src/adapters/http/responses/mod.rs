//! HTTP adapter for the responses API.
//!
//! - `POST /api/v1/responses/:bot_id` - Render one template of a bot

mod dto;
mod handlers;
mod routes;

pub use dto::GenerateResponseRequest;
pub use handlers::generate_response;
pub use routes::responses_routes;
