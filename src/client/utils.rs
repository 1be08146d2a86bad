//! Utility functions for the HTTP client.
//!
//! This module provides helper functions for:
//! - Backoff delay calculation
//! - Redirect classification
//!
//! Which statuses are retried is decided by
//! [`RetryPolicy::retries_status`](super::RetryPolicy::retries_status) alone.
//! These are pure functions; the retry loop in [`HttpClient`](super::HttpClient)
//! combines them with a [`RetryPolicy`](super::RetryPolicy).

use std::time::Duration;

/// Check if status code is a redirect (3xx)
pub fn is_redirect_status(status: u16) -> bool {
    (300..400).contains(&status)
}

/// Exponential backoff delay calculation.
///
/// `consecutive_errors` counts the failed attempts so far, including the one that
/// just happened. No delay is applied before the first retry; afterwards the delay
/// is `factor * 2^(consecutive_errors - 1)` seconds, capped at `max`.
///
/// # Examples
///
/// ```
/// use overeasy_http::client::exponential_backoff;
/// use std::time::Duration;
///
/// assert_eq!(exponential_backoff(1, 2.0, 120.0), Duration::ZERO);
/// assert_eq!(exponential_backoff(2, 2.0, 120.0), Duration::from_secs(4));
/// assert_eq!(exponential_backoff(3, 2.0, 120.0), Duration::from_secs(8));
/// ```
pub fn exponential_backoff(consecutive_errors: u32, factor: f64, max: f64) -> Duration {
    if consecutive_errors <= 1 || factor <= 0.0 {
        return Duration::ZERO;
    }
    let exponent = (consecutive_errors - 1).min(30) as i32;
    let secs = (factor * 2_f64.powi(exponent)).min(max.max(0.0));
    Duration::from_secs_f64(secs)
}
