//! HTTP adapter for the action webhook.
//!
//! - `POST /webhook` - Run the action named by `next_action` for one turn

mod handlers;
mod routes;

pub use handlers::run_action;
pub use routes::webhook_routes;
