//! HTTP handler for the responses API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::GenerateResponseRequest;
use crate::adapters::http::error::{responses_error, ErrorResponse};
use crate::application::{GenerateResponseCommand, GenerateResponseHandler};

/// POST /api/v1/responses/:bot_id - Render a template for a bot
pub async fn generate_response(
    State(handler): State<Arc<GenerateResponseHandler>>,
    Path(bot_id): Path<String>,
    request: Result<Json<GenerateResponseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            return ErrorResponse::bad_request(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let cmd = GenerateResponseCommand {
        bot_id,
        template: request.template,
    };

    match handler.handle(cmd).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => responses_error(&e),
    }
}
