//! HTTP request handlers for API endpoints.

pub mod health;
pub mod send_email;

pub use health::health_handler;
pub use send_email::{method_not_allowed_handler, send_email_handler};
