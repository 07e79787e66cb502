//! Storage Adapters
//!
//! Implementations of the DocumentStore port.
//!
//! ## Available Adapters
//!
//! - **JsonFileDocumentStore** - One pretty-printed JSON file per document
//! - **InMemoryDocumentStore** - Keeps documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryDocumentStore, JsonFileDocumentStore};
//!
//! // Production: file-based storage under .state/rasa
//! let store = JsonFileDocumentStore::open(".state", "rasa").await?;
//!
//! // Testing: in-memory storage
//! let store = InMemoryDocumentStore::default();
//! ```

mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryDocumentStore;
pub use json_file_store::JsonFileDocumentStore;
