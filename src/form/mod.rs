//! Registration form client.
//!
//! Mirrors the server's checks with stricter, user-facing rules so most
//! mistakes are caught before anything is sent, then submits only the
//! non-secret fields to `POST /api/send-email`.
//!
//! - [`validation`] - Form state and per-field validators
//! - [`strength`] - Password strength score
//! - [`countries`] - Supported dialing codes
//! - [`client`] - HTTP submission and status-to-message mapping

pub mod client;
pub mod countries;
pub mod strength;
pub mod validation;

pub use client::{
    RESET_DELAY, RegistrationClient, SUCCESS_MESSAGE, SubmitError, SubmitReceipt, SubmitStatus,
};
pub use countries::{COUNTRY_CODES, Country, find_country};
pub use strength::{StrengthLevel, password_strength};
pub use validation::{FieldResult, FormErrors, FormField, RegistrationForm};
