//! Infrastructure layer for external integrations.
//!
//! - [`email`] - Delivery of rendered notifications through an email provider

pub mod email;
