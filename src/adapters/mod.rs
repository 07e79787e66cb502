//! Adapters - Implementations of port interfaces.
//!
//! - `forms` - Form definitions loaded from disk
//! - `http` - axum routers for the webhook and responses API
//! - `storage` - DocumentStore implementations (JSON files, in-memory)

pub mod forms;
pub mod http;
pub mod storage;
