//! Form Actions - custom-action webhook for a dialogue orchestrator
//!
//! The orchestrator posts one request per dialogue turn; registered actions
//! (mostly slot-filling forms) answer with state-changing events and the
//! responses to send to the user.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
