//! Application layer services.
//!
//! Services sit between HTTP handlers and infrastructure: they resolve
//! configuration, call the domain layer and map failures to [`crate::AppError`].
//!
//! # Available Services
//!
//! - [`services::registration_service::RegistrationService`] - Registration notifications

pub mod services;
