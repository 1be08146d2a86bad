//! Client configuration.

use super::retry::RetryPolicy;
use crate::response::Headers;
use serde::{Deserialize, Serialize};

/// Default number of pooled connections kept per host.
pub const DEFAULT_MAX_POOL: usize = 10;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for [`HttpClient`](super::HttpClient).
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// use overeasy_http::client::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"max_pool": 2}"#).unwrap();
/// assert_eq!(config.max_pool, 2);
/// assert_eq!(config.retry.total, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Headers sent on every call that does not pass its own
    pub default_headers: Headers,
    /// Idle connections kept per host
    pub max_pool: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
    /// Retry and backoff behavior
    pub retry: RetryPolicy,
    /// Emit `tracing` events for retries
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            default_headers: Headers::new(),
            max_pool: DEFAULT_MAX_POOL,
            request_timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            retry: RetryPolicy::default(),
            enable_logging: true,
        }
    }
}

impl ClientConfig {
    /// Replace the default headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// Set the pool size.
    pub fn with_max_pool(mut self, max_pool: usize) -> Self {
        self.max_pool = max_pool;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
