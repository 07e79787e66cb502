//! In-memory document store, for tests and throwaway deployments.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::ports::{validate_id, Collection, Document, DocumentError, DocumentStore};

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// Document store held entirely in memory.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    name: String,
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of documents across all collections.
    pub async fn document_count(&self) -> usize {
        self.collections.read().await.values().map(BTreeMap::len).sum()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_document(&self, doc: Document) -> Result<Document, DocumentError> {
        validate_id(&doc.collection_id)?;
        validate_id(&doc.id)?;

        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(&doc.collection_id)
            .ok_or_else(|| DocumentError::collection_not_found(&doc.collection_id))?;
        if docs.contains_key(&doc.id) {
            return Err(DocumentError::document_exists(&doc.id));
        }

        docs.insert(doc.id.clone(), doc.payload.clone());
        Ok(doc)
    }

    async fn get_document(
        &self,
        collection_id: &str,
        doc_id: &str,
    ) -> Result<Document, DocumentError> {
        let collections = self.collections.read().await;
        collections
            .get(collection_id)
            .and_then(|docs| docs.get(doc_id))
            .map(|payload| Document::new(collection_id, doc_id, payload.clone()))
            .ok_or_else(|| DocumentError::document_not_found(doc_id))
    }

    async fn update_document(&self, doc: Document) -> Result<Document, DocumentError> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(&doc.collection_id)
            .and_then(|docs| docs.get_mut(&doc.id))
            .ok_or_else(|| DocumentError::document_not_found(&doc.id))?;

        *slot = doc.payload.clone();
        Ok(doc)
    }

    async fn delete_document(
        &self,
        collection_id: &str,
        doc_id: &str,
    ) -> Result<Document, DocumentError> {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection_id)
            .and_then(|docs| docs.remove(doc_id))
            .map(|payload| Document::new(collection_id, doc_id, payload))
            .ok_or_else(|| DocumentError::document_not_found(doc_id))
    }

    async fn has_document(&self, collection_id: &str, doc_id: &str) -> Result<bool, DocumentError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection_id)
            .is_some_and(|docs| docs.contains_key(doc_id)))
    }

    async fn create_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        validate_id(collection_id)?;

        let mut collections = self.collections.write().await;
        if collections.contains_key(collection_id) {
            return Err(DocumentError::collection_exists(collection_id));
        }

        collections.insert(collection_id.to_string(), BTreeMap::new());
        Ok(Collection::empty(collection_id))
    }

    async fn get_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection_id)
            .ok_or_else(|| DocumentError::collection_not_found(collection_id))?;

        Ok(Collection {
            id: collection_id.to_string(),
            documents: docs
                .iter()
                .map(|(id, payload)| Document::new(collection_id, id.as_str(), payload.clone()))
                .collect(),
        })
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        let mut collections = self.collections.write().await;
        collections
            .remove(collection_id)
            .map(|_| Collection::empty(collection_id))
            .ok_or_else(|| DocumentError::collection_not_found(collection_id))
    }

    async fn has_collection(&self, collection_id: &str) -> Result<bool, DocumentError> {
        Ok(self.collections.read().await.contains_key(collection_id))
    }
}
