//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - JSON document persistence (response templates)

mod document_store;

pub use document_store::{validate_id, Collection, Document, DocumentError, DocumentStore};
