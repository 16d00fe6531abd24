//! Application services orchestrating domain logic and infrastructure.
//!
//! - [`RegistrationService`] - Renders and delivers registration notifications

pub mod registration_service;

pub use registration_service::RegistrationService;
