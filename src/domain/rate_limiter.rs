//! Fixed-window, per-source rate limiting for the notification endpoint.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::{Duration, Instant};

/// Length of one counting window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Requests a single source may make inside one window.
pub const MAX_REQUESTS_PER_WINDOW: u32 = 5;

/// Request count for one source key within its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at: Instant,
}

impl RateLimitEntry {
    fn first_request(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_reset_at: now + window,
        }
    }

    /// A window is over once its reset instant has been reached.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.window_reset_at
    }
}

/// Outcome of [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// `retry_after_seconds` is the remaining window time, rounded up.
    Denied { retry_after_seconds: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Process-local table of per-source request counts.
///
/// The read-modify-write for a key happens under the map's shard lock via
/// the entry API, so concurrent requests from one source are counted exactly.
/// State is lost on restart and is not shared between instances.
#[derive(Debug)]
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    /// Creates a limiter with the standard 5 requests per 60 seconds.
    pub fn new() -> Self {
        Self::with_limits(RATE_LIMIT_WINDOW, MAX_REQUESTS_PER_WINDOW)
    }

    pub fn with_limits(window: Duration, max_requests: u32) -> Self {
        Self {
            entries: DashMap::new(),
            window,
            max_requests,
        }
    }

    /// Counts a request from `source_key` and decides whether it may proceed.
    pub fn check(&self, source_key: &str) -> RateLimitDecision {
        self.check_at(source_key, Instant::now())
    }

    /// [`check`](Self::check) against an explicit clock reading.
    pub fn check_at(&self, source_key: &str, now: Instant) -> RateLimitDecision {
        match self.entries.entry(source_key.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry::first_request(now, self.window));
                RateLimitDecision::Allowed
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();

                if entry.is_expired(now) {
                    *entry = RateLimitEntry::first_request(now, self.window);
                    return RateLimitDecision::Allowed;
                }

                if entry.count < self.max_requests {
                    entry.count += 1;
                    return RateLimitDecision::Allowed;
                }

                let remaining = entry.window_reset_at.duration_since(now);
                RateLimitDecision::Denied {
                    retry_after_seconds: ceil_seconds(remaining),
                }
            }
        }
    }

    /// Removes every entry whose window has elapsed. Returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of source keys currently tracked.
    pub fn tracked_sources(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, source_key: &str) -> Option<RateLimitEntry> {
        self.entries.get(source_key).map(|entry| *entry)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn ceil_seconds(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
