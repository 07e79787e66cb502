//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, serde helpers)
//! - `dialogue` - Tracker snapshot and recognized user input
//! - `events` - Events returned to the orchestrator
//! - `action` - Action trait, request/result types and the registry
//! - `form` - Slot extraction and the per-turn form engine
//! - `forms` - Concrete forms (incident, YAML-defined)

pub mod action;
pub mod dialogue;
pub mod events;
pub mod form;
pub mod forms;
pub mod foundation;
