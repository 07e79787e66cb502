//! ResponsesService - response template documents.
//!
//! Templates are stored as one document per bot in the responses collection.
//! A document maps template names to a list of response bodies:
//!
//! ```json
//! { "utter_ask_priority": [ { "text": "What priority should this have?" } ] }
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::foundation::ErrorCode;
use crate::ports::{Document, DocumentError, DocumentStore};

/// Default collection holding response documents.
pub const RESPONSES_COLLECTION_ID: &str = "responses";

/// Bot whose document is seeded on first start.
pub const DEFAULT_BOT_ID: &str = "workshop";

const BUNDLED_RESPONSES: &str = include_str!("../../resources/workshop-responses.json");

/// Errors raised while reading or resolving response templates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponsesError {
    #[error(transparent)]
    Storage(#[from] DocumentError),

    #[error("Template '{template}' not found for bot '{bot_id}'")]
    UnknownTemplate { template: String, bot_id: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl ResponsesError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResponsesError::Storage(e) => e.code(),
            ResponsesError::UnknownTemplate { .. } => ErrorCode::UnknownTemplate,
            ResponsesError::InvalidPayload(_) => ErrorCode::InvalidPayload,
        }
    }
}

/// Reads response documents and resolves template names to bodies.
pub struct ResponsesService {
    store: Arc<dyn DocumentStore>,
    collection_id: String,
    default_bot_id: String,
}

impl std::fmt::Debug for ResponsesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsesService")
            .field("store", &self.store.name())
            .field("collection_id", &self.collection_id)
            .field("default_bot_id", &self.default_bot_id)
            .finish()
    }
}

impl ResponsesService {
    /// Creates the service, making sure the collection exists and the default
    /// bot document is seeded from the bundled templates.
    pub async fn init(
        store: Arc<dyn DocumentStore>,
        collection_id: impl Into<String>,
        default_bot_id: impl Into<String>,
    ) -> Result<Self, ResponsesError> {
        let service = Self {
            store,
            collection_id: collection_id.into(),
            default_bot_id: default_bot_id.into(),
        };
        service.seed().await?;
        Ok(service)
    }

    /// Same as [`ResponsesService::init`] with the default collection and bot.
    pub async fn with_defaults(store: Arc<dyn DocumentStore>) -> Result<Self, ResponsesError> {
        Self::init(store, RESPONSES_COLLECTION_ID, DEFAULT_BOT_ID).await
    }

    async fn seed(&self) -> Result<(), ResponsesError> {
        if !self.store.has_collection(&self.collection_id).await? {
            self.store.create_collection(&self.collection_id).await?;
            info!("Created '{}' collection in {}", self.collection_id, self.store.name());
        }

        if !self
            .store
            .has_document(&self.collection_id, &self.default_bot_id)
            .await?
        {
            let payload: Value = serde_json::from_str(BUNDLED_RESPONSES)
                .map_err(|e| DocumentError::Serialization(e.to_string()))?;
            self.store
                .create_document(Document::new(
                    self.collection_id.as_str(),
                    self.default_bot_id.as_str(),
                    payload,
                ))
                .await?;
            info!("Seeded '{}' responses", self.default_bot_id);
        }

        Ok(())
    }

    pub fn default_bot_id(&self) -> &str {
        &self.default_bot_id
    }

    /// Loads the response document of a bot.
    pub async fn get_response(&self, bot_id: &str) -> Result<Document, ResponsesError> {
        Ok(self.store.get_document(&self.collection_id, bot_id).await?)
    }

    /// Loads the default bot's response document.
    pub async fn default_response(&self) -> Result<Document, ResponsesError> {
        self.get_response(&self.default_bot_id).await
    }

    /// Returns the first body of the named template.
    pub async fn generate_response(
        &self,
        bot_id: &str,
        template: &str,
    ) -> Result<Value, ResponsesError> {
        let doc = self.get_response(bot_id).await?;
        first_body(&doc.payload, template, bot_id)
    }

    /// Resolves templates in order against one bot document, read once.
    pub async fn resolve_templates(
        &self,
        bot_id: &str,
        templates: &[String],
    ) -> Result<Vec<Value>, ResponsesError> {
        if templates.is_empty() {
            return Ok(Vec::new());
        }

        let doc = self.get_response(bot_id).await?;
        templates
            .iter()
            .map(|template| first_body(&doc.payload, template, bot_id))
            .collect()
    }
}

fn first_body(payload: &Value, template: &str, bot_id: &str) -> Result<Value, ResponsesError> {
    payload
        .get(template)
        .and_then(Value::as_array)
        .and_then(|bodies| bodies.first())
        .cloned()
        .ok_or_else(|| ResponsesError::UnknownTemplate {
            template: template.to_string(),
            bot_id: bot_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDocumentStore;
    use serde_json::json;

    async fn service() -> (Arc<InMemoryDocumentStore>, ResponsesService) {
        let store = Arc::new(InMemoryDocumentStore::default());
        let service = ResponsesService::with_defaults(store.clone()).await.unwrap();
        (store, service)
    }

    #[test]
    fn bundled_responses_are_valid_json() {
        let payload: Value = serde_json::from_str(BUNDLED_RESPONSES).unwrap();
        for template in [
            "utter_ask_incident_title",
            "utter_ask_problem_description",
            "utter_ask_priority",
            "utter_ask_confirm",
            "utter_no_priority",
            "utter_incident_created",
            "utter_incident_creation_canceled",
        ] {
            assert!(first_body(&payload, template, DEFAULT_BOT_ID).is_ok(), "{template}");
        }
    }

    #[tokio::test]
    async fn init_seeds_default_document() {
        let (store, service) = service().await;

        assert!(store.has_document("responses", "workshop").await.unwrap());
        let doc = service.default_response().await.unwrap();
        assert!(doc.payload.get("utter_greet").is_some());
    }

    #[tokio::test]
    async fn init_keeps_existing_document() {
        let store = Arc::new(InMemoryDocumentStore::default());
        store.create_collection("responses").await.unwrap();
        store
            .create_document(Document::new(
                "responses",
                "workshop",
                json!({"utter_greet": [{"text": "custom"}]}),
            ))
            .await
            .unwrap();

        let service = ResponsesService::with_defaults(store).await.unwrap();

        let body = service.generate_response("workshop", "utter_greet").await.unwrap();
        assert_eq!(body, json!({"text": "custom"}));
    }

    #[tokio::test]
    async fn init_twice_is_harmless() {
        let (store, _) = service().await;
        assert!(ResponsesService::with_defaults(store).await.is_ok());
    }

    #[tokio::test]
    async fn generate_returns_first_body() {
        let (store, service) = service().await;
        store
            .create_document(Document::new(
                "responses",
                "other",
                json!({"utter_hi": [{"text": "one"}, {"text": "two"}]}),
            ))
            .await
            .unwrap();

        let body = service.generate_response("other", "utter_hi").await.unwrap();

        assert_eq!(body, json!({"text": "one"}));
    }

    #[tokio::test]
    async fn unknown_template_is_reported() {
        let (_, service) = service().await;

        let err = service
            .generate_response("workshop", "utter_nope")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ResponsesError::UnknownTemplate {
                template: "utter_nope".into(),
                bot_id: "workshop".into()
            }
        );
        assert_eq!(err.code(), ErrorCode::UnknownTemplate);
    }

    #[tokio::test]
    async fn unknown_bot_is_not_found() {
        let (_, service) = service().await;

        let err = service.generate_response("ghost", "utter_greet").await.unwrap_err();

        assert!(matches!(err, ResponsesError::Storage(DocumentError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolve_keeps_template_order() {
        let (_, service) = service().await;

        let bodies = service
            .resolve_templates(
                "workshop",
                &["utter_no_priority".to_string(), "utter_ask_priority".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(bodies.len(), 2);
        assert!(bodies[0]["text"].as_str().unwrap().contains("not a valid priority"));
        assert!(bodies[1].get("buttons").is_some());
    }

    #[tokio::test]
    async fn resolve_nothing_skips_store() {
        let (_, service) = service().await;
        let bodies = service.resolve_templates("ghost", &[]).await.unwrap();
        assert!(bodies.is_empty());
    }
}
