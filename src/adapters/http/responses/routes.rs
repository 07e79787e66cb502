//! HTTP routes for the responses API.

use std::sync::Arc;

use axum::{routing::post, Router};

use super::handlers::generate_response;
use crate::application::GenerateResponseHandler;

/// Creates the responses router, to be nested under `/api/v1/responses`.
pub fn responses_routes(handler: Arc<GenerateResponseHandler>) -> Router {
    Router::new()
        .route("/:bot_id", post(generate_response))
        .with_state(handler)
}
