//! Domain layer: registration data, notification rendering and rate limiting.
//!
//! - [`registration`] - Inbound submission model and validation
//! - [`notification`] - Administrator email rendered from a submission
//! - [`rate_limiter`] - Per-source fixed-window request limiting
//! - [`sweeper`] - Background removal of expired rate-limit entries
//!
//! Nothing here touches HTTP or the email provider; the handler in
//! [`crate::api::handlers`] orchestrates these pieces.

pub mod notification;
pub mod rate_limiter;
pub mod registration;
pub mod sweeper;
