//! Background housekeeping for the rate-limit table.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::domain::rate_limiter::RateLimiter;

/// Default period between sweeps of expired rate-limit entries.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodically drops expired entries so abandoned source keys don't pile up.
///
/// Runs until the task is aborted or the runtime shuts down. Each sweep only
/// holds one shard lock at a time, so request handling is never stalled.
pub async fn run_rate_limit_sweeper(limiter: Arc<RateLimiter>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately; there is nothing to sweep yet.
    interval.tick().await;

    loop {
        interval.tick().await;

        let removed = limiter.sweep_expired();
        debug!(
            removed,
            remaining = limiter.tracked_sources(),
            "Swept expired rate limit entries"
        );
    }
}
