//! Data Transfer Objects for API responses.
//!
//! Request bodies are parsed by the domain layer
//! ([`crate::domain::registration::RegistrationSubmission`]) so the endpoint
//! can check configuration and headers before touching the body.

pub mod health;
pub mod registration;
