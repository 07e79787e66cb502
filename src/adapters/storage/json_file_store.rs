//! JSON file document store.
//!
//! Each document is one pretty-printed JSON file:
//!
//! ```text
//! {state_folder}/{db_name}/
//! └── responses/
//!     └── workshop
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use crate::ports::{validate_id, Collection, Document, DocumentError, DocumentStore};

/// File-backed document store guarded by one readers-writer lock.
#[derive(Debug)]
pub struct JsonFileDocumentStore {
    name: String,
    root: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileDocumentStore {
    /// Opens the store rooted at `{state_folder}/{db_name}`, creating the
    /// directory if needed.
    pub async fn open(
        state_folder: impl AsRef<Path>,
        db_name: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        let name = db_name.into();
        validate_id(&name)?;

        let root = state_folder.as_ref().join(&name);
        fs::create_dir_all(&root)
            .await
            .map_err(|e| DocumentError::Io(format!("Unable to create root folder: {}", e)))?;

        Ok(Self {
            name,
            root,
            lock: RwLock::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection_id: &str) -> Result<PathBuf, DocumentError> {
        validate_id(collection_id)?;
        Ok(self.root.join(collection_id))
    }

    fn document_path(&self, collection_id: &str, doc_id: &str) -> Result<PathBuf, DocumentError> {
        validate_id(doc_id)?;
        Ok(self.collection_dir(collection_id)?.join(doc_id))
    }

    /// Writes to a sibling temp file, then renames over the target.
    async fn write_json(path: &Path, payload: &Value) -> Result<(), DocumentError> {
        let bytes = serde_json::to_vec_pretty(payload)
            .map_err(|e| DocumentError::Serialization(e.to_string()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DocumentError::Io(format!("Invalid path: {}", path.display())))?;
        let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| DocumentError::Io(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| DocumentError::Io(format!("Failed to rename file: {}", e)))
    }

    async fn read_json(path: &Path) -> Result<Value, DocumentError> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| DocumentError::Io(format!("Failed to read file: {}", e)))?;
        serde_json::from_slice(&bytes).map_err(|e| DocumentError::Serialization(e.to_string()))
    }

    async fn exists(path: &Path) -> Result<bool, DocumentError> {
        fs::try_exists(path)
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_document(&self, doc: Document) -> Result<Document, DocumentError> {
        let dir = self.collection_dir(&doc.collection_id)?;
        let path = self.document_path(&doc.collection_id, &doc.id)?;
        let _guard = self.lock.write().await;

        if !Self::exists(&dir).await? {
            return Err(DocumentError::collection_not_found(&doc.collection_id));
        }
        if Self::exists(&path).await? {
            return Err(DocumentError::document_exists(&doc.id));
        }

        Self::write_json(&path, &doc.payload).await?;
        Ok(doc)
    }

    async fn get_document(
        &self,
        collection_id: &str,
        doc_id: &str,
    ) -> Result<Document, DocumentError> {
        let path = self.document_path(collection_id, doc_id)?;
        let _guard = self.lock.read().await;

        if !Self::exists(&path).await? {
            return Err(DocumentError::document_not_found(doc_id));
        }

        let payload = Self::read_json(&path).await?;
        Ok(Document::new(collection_id, doc_id, payload))
    }

    async fn update_document(&self, doc: Document) -> Result<Document, DocumentError> {
        let path = self.document_path(&doc.collection_id, &doc.id)?;
        let _guard = self.lock.write().await;

        if !Self::exists(&path).await? {
            return Err(DocumentError::document_not_found(&doc.id));
        }

        Self::write_json(&path, &doc.payload).await?;
        Ok(doc)
    }

    async fn delete_document(
        &self,
        collection_id: &str,
        doc_id: &str,
    ) -> Result<Document, DocumentError> {
        let path = self.document_path(collection_id, doc_id)?;
        let _guard = self.lock.write().await;

        if !Self::exists(&path).await? {
            return Err(DocumentError::document_not_found(doc_id));
        }

        let payload = Self::read_json(&path).await?;
        fs::remove_file(&path)
            .await
            .map_err(|e| DocumentError::Io(format!("Unable to delete document {}: {}", doc_id, e)))?;

        Ok(Document::new(collection_id, doc_id, payload))
    }

    async fn has_document(&self, collection_id: &str, doc_id: &str) -> Result<bool, DocumentError> {
        let path = self.document_path(collection_id, doc_id)?;
        let _guard = self.lock.read().await;
        Self::exists(&path).await
    }

    async fn create_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        let dir = self.collection_dir(collection_id)?;
        let _guard = self.lock.write().await;

        if Self::exists(&dir).await? {
            return Err(DocumentError::collection_exists(collection_id));
        }

        fs::create_dir(&dir).await.map_err(|e| {
            DocumentError::Io(format!("Unable to create collection {}: {}", collection_id, e))
        })?;

        Ok(Collection::empty(collection_id))
    }

    async fn get_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        let dir = self.collection_dir(collection_id)?;
        let _guard = self.lock.read().await;

        if !Self::exists(&dir).await? {
            return Err(DocumentError::collection_not_found(collection_id));
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))?;

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocumentError::Io(e.to_string()))?
        {
            let Some(doc_id) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if validate_id(&doc_id).is_err() {
                continue;
            }

            match Self::read_json(&entry.path()).await {
                Ok(payload) => documents.push(Document::new(collection_id, doc_id, payload)),
                Err(e) => warn!("Unable to read JSON from {}: {}", entry.path().display(), e),
            }
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Collection {
            id: collection_id.to_string(),
            documents,
        })
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<Collection, DocumentError> {
        let dir = self.collection_dir(collection_id)?;
        let _guard = self.lock.write().await;

        if !Self::exists(&dir).await? {
            return Err(DocumentError::collection_not_found(collection_id));
        }

        fs::remove_dir_all(&dir).await.map_err(|e| {
            DocumentError::Io(format!("Unable to delete collection {}: {}", collection_id, e))
        })?;

        Ok(Collection::empty(collection_id))
    }

    async fn has_collection(&self, collection_id: &str) -> Result<bool, DocumentError> {
        let dir = self.collection_dir(collection_id)?;
        let _guard = self.lock.read().await;
        Self::exists(&dir).await
    }
}
