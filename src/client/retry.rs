//! Retry policy for [`HttpClient`](super::HttpClient).
//!
//! The defaults mirror the classic pooled-client settings: three retries,
//! exponential backoff with a factor of two seconds, retry on `500/502/503/504`,
//! return (rather than raise) the last response when the status budget runs out,
//! and raise when the server answers with a redirect.
//!
//! [`RetryState`] is the per-call bookkeeping; the policy itself is immutable
//! once the client is built.

use super::utils::exponential_backoff;
use http::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of retries after the first attempt.
pub const RETRY_TOTAL: u32 = 3;
/// Backoff factor, in seconds.
pub const RETRY_BACKOFF_FACTOR: f64 = 2.0;
/// Upper bound on any single backoff sleep, in seconds.
pub const RETRY_BACKOFF_MAX: f64 = 120.0;
/// Whether exhausting retries on a forcelisted status raises instead of returning.
pub const RETRY_RAISE_ON_STATUS: bool = false;
/// Whether a redirect response raises instead of being returned.
pub const RETRY_RAISE_ON_REDIRECT: bool = true;
/// Statuses that trigger a retry.
pub const RETRY_STATUS_FORCELIST: [u16; 4] = [500, 502, 503, 504];
/// Methods that may be retried.
pub const RETRY_ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub total: u32,
    /// Backoff factor in seconds
    pub backoff_factor: f64,
    /// Cap on a single backoff sleep in seconds
    pub backoff_max: f64,
    /// Raise once the status budget is spent instead of returning the last response
    pub raise_on_status: bool,
    /// Raise on 3xx instead of returning it
    pub raise_on_redirect: bool,
    /// Statuses that are retried
    pub status_forcelist: Vec<u16>,
    /// Upper-case method names that are retried
    pub allowed_methods: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            total: RETRY_TOTAL,
            backoff_factor: RETRY_BACKOFF_FACTOR,
            backoff_max: RETRY_BACKOFF_MAX,
            raise_on_status: RETRY_RAISE_ON_STATUS,
            raise_on_redirect: RETRY_RAISE_ON_REDIRECT,
            status_forcelist: RETRY_STATUS_FORCELIST.to_vec(),
            allowed_methods: RETRY_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        RetryPolicy {
            total: 0,
            ..Default::default()
        }
    }

    /// Whether requests with this method may be retried at all.
    pub fn allows_method(&self, method: &Method) -> bool {
        self.allowed_methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method.as_str()))
    }

    /// Whether a response with this status should be retried.
    pub fn retries_status(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Delay before the next attempt after `consecutive_errors` failures.
    pub fn backoff(&self, consecutive_errors: u32) -> Duration {
        exponential_backoff(consecutive_errors, self.backoff_factor, self.backoff_max)
    }
}

/// What the client should do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then try again
    Retry(Duration),
    /// The budget is spent
    GiveUp,
}

/// Per-call retry bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct RetryState {
    errors: u32,
}

impl RetryState {
    /// Fresh state for a new call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Failed attempts recorded so far.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Record a failed attempt and decide whether to go again.
    pub fn record_failure(&mut self, policy: &RetryPolicy, method: &Method) -> RetryDecision {
        self.errors += 1;
        if !policy.allows_method(method) || self.errors > policy.total {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry(policy.backoff(self.errors))
    }
}
