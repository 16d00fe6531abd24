//! Utility functions for request handling and document rendering.
//!
//! - [`client_ip`] - Rate-limit source key extraction from proxy headers
//! - [`html`] - HTML escaping for interpolated user input

pub mod client_ip;
pub mod html;
