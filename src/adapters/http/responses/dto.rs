//! Request types for the responses API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/responses/:bot_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponseRequest {
    pub template: String,
}
