//! DocumentStore port - keyed JSON document persistence.
//!
//! Documents live in named collections and are addressed by
//! `(collection_id, document_id)`. Response templates are the main tenant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::ErrorCode;

/// A JSON document stored under a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub collection_id: String,
    pub id: String,
    pub payload: Value,
}

impl Document {
    pub fn new(collection_id: impl Into<String>, id: impl Into<String>, payload: Value) -> Self {
        Self {
            collection_id: collection_id.into(),
            id: id.into(),
            payload,
        }
    }
}

/// A collection and the documents it currently holds, ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub documents: Vec<Document>,
}

impl Collection {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            documents: Vec::new(),
        }
    }
}

/// Errors raised by document stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DocumentError {
    pub fn document_not_found(doc_id: &str) -> Self {
        DocumentError::NotFound(format!("Document not found: {}", doc_id))
    }

    pub fn collection_not_found(collection_id: &str) -> Self {
        DocumentError::NotFound(format!("Collection not found: {}", collection_id))
    }

    pub fn document_exists(doc_id: &str) -> Self {
        DocumentError::AlreadyExists(format!("There's an existing document: {}", doc_id))
    }

    pub fn collection_exists(collection_id: &str) -> Self {
        DocumentError::AlreadyExists(format!("There's an existing collection: {}", collection_id))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::NotFound(_) => ErrorCode::DocumentNotFound,
            DocumentError::AlreadyExists(_) => ErrorCode::DocumentExists,
            DocumentError::InvalidId(_) => ErrorCode::ValidationFailed,
            DocumentError::Io(_) | DocumentError::Serialization(_) => ErrorCode::StorageError,
        }
    }
}

/// Checks that an id can be used as a single path segment.
///
/// Ids are non-empty, must not start with a dot, and may only contain ASCII
/// letters, digits, `-`, `_` and `.`.
pub fn validate_id(id: &str) -> Result<(), DocumentError> {
    let valid = !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(DocumentError::InvalidId(id.to_string()))
    }
}

/// Port for document persistence.
///
/// Implementations serialize access with a single readers-writer lock:
/// writes are exclusive, reads run concurrently.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store name, used for logging.
    fn name(&self) -> &str;

    /// Creates a document. Fails if it exists or its collection does not.
    async fn create_document(&self, doc: Document) -> Result<Document, DocumentError>;

    async fn get_document(&self, collection_id: &str, doc_id: &str)
        -> Result<Document, DocumentError>;

    /// Replaces the payload of an existing document.
    async fn update_document(&self, doc: Document) -> Result<Document, DocumentError>;

    /// Deletes a document, returning its last payload.
    async fn delete_document(
        &self,
        collection_id: &str,
        doc_id: &str,
    ) -> Result<Document, DocumentError>;

    async fn has_document(&self, collection_id: &str, doc_id: &str) -> Result<bool, DocumentError>;

    async fn create_collection(&self, collection_id: &str) -> Result<Collection, DocumentError>;

    /// Loads a collection with all of its documents.
    async fn get_collection(&self, collection_id: &str) -> Result<Collection, DocumentError>;

    /// Deletes a collection and every document in it.
    async fn delete_collection(&self, collection_id: &str) -> Result<Collection, DocumentError>;

    async fn has_collection(&self, collection_id: &str) -> Result<bool, DocumentError>;
}
