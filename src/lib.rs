//! # Registration Notifier
//!
//! Backend for a registration form: accepts a sign-up, checks it, and emails
//! the administrator a notification through a transactional email provider.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Submission validation, notification rendering, rate limiting
//! - **Application Layer** ([`application`]) - Notification service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Email provider client
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//! - **Form Client** ([`form`]) - Client-side validation and submission, used by the `register` binary
//!
//! ## Quick Start
//!
//! ```bash
//! export RESEND_API_KEY="re_..."
//! export ADMIN_EMAIL="admin@example.com"
//!
//! # Start the service
//! cargo run
//!
//! # Fill in the form from a terminal
//! cargo run --bin register -- --endpoint http://localhost:3000/api/send-email
//! ```
//!
//! ## Rate Limiting
//!
//! Each source may trigger 5 notifications per 60 seconds. Counts live in
//! process memory only: they reset on restart and are per instance.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod form;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::RegistrationService;
    pub use crate::config::MailSettings;
    pub use crate::domain::notification::EmailNotification;
    pub use crate::domain::rate_limiter::{RateLimitDecision, RateLimiter};
    pub use crate::domain::registration::RegistrationSubmission;
    pub use crate::error::AppError;
    pub use crate::infrastructure::email::{EmailError, EmailResult, EmailSender};
    pub use crate::state::AppState;
}
