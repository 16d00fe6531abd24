//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::RegistrationService;
use crate::domain::rate_limiter::RateLimiter;

/// Cheap to clone: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<RegistrationService>,
    /// Process-wide table, also referenced by the background sweeper.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        registration_service: Arc<RegistrationService>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            registration_service,
            rate_limiter,
        }
    }
}
