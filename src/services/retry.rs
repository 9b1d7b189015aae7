//! Retry policy helpers
//!
//! Pure functions behind the request engine's retry loop: the backoff
//! schedule and the response classifier. Both are unit-testable without a
//! network.

use std::time::Duration;

/// Base backoff delay in milliseconds
pub const BASE_DELAY_MS: u64 = 1000;

/// Backoff ceiling in milliseconds
pub const MAX_DELAY_MS: u64 = 4000;

/// How a completed response is treated by the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 2xx: parse the body and return
    Success,
    /// 5xx: provider-side failure, eligible for the retry budget
    Retry,
    /// Anything else (all 4xx included): terminal on the first attempt
    Fail,
}

/// Classify an HTTP status code for the retry loop.
///
/// Only server errors are retried. 429 lands in `Fail` on purpose: the
/// caller owns rate-limit backoff.
pub fn classify_status(status: u16) -> Disposition {
    match status {
        200..=299 => Disposition::Success,
        500..=599 => Disposition::Retry,
        _ => Disposition::Fail,
    }
}

/// Backoff delay before re-running failed attempt index `attempt` (0-based).
///
/// Exponential with a low ceiling: 1s, 2s, 4s, then 4s for every further
/// retry. The target failures are provider-side overload conditions expected
/// to clear within seconds, not long outages.
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.min(16);
    Duration::from_millis((BASE_DELAY_MS << exponent).min(MAX_DELAY_MS))
}
