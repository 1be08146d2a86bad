//! Error types for the overeasy HTTP client.
//!
//! HTTP error status codes (4xx/5xx) are **not** errors here. They come back as a
//! normal [`Response`](crate::Response) and are inspected through
//! [`Response::status`](crate::Response::status) and
//! [`Response::has_success`](crate::Response::has_success).
//!
//! An [`OverEasyError`] is only produced when the call itself could not complete:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Http`](OverEasyError::Http) | Connection failure, exhausted retries |
//! | [`Timeout`](OverEasyError::Timeout) | The transport gave up waiting |
//! | [`Request`](OverEasyError::Request) | The transport refused to build the request (e.g. unsupported scheme) |
//! | [`Redirect`](OverEasyError::Redirect) | A 3xx came back and the policy raises on redirect |
//! | [`InvalidUrl`](OverEasyError::InvalidUrl) | The URL could not be parsed |
//! | [`InvalidHeader`](OverEasyError::InvalidHeader) | A header name or value is not valid HTTP |
//! | [`Encoding`](OverEasyError::Encoding) | The request body could not be encoded |
//! | [`Json`](OverEasyError::Json) | [`Response::json`](crate::Response::json) on a non-JSON body |
//! | [`UrlMismatch`](OverEasyError::UrlMismatch) | The mock client saw an unexpected URL |
//! | [`MockExhausted`](OverEasyError::MockExhausted) | The mock client had nothing queued |

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OverEasyError>;

/// Errors surfaced by [`HttpClient`](crate::HttpClient) and
/// [`ClientMocker`](crate::ClientMocker).
#[derive(Debug, thiserror::Error)]
pub enum OverEasyError {
    /// Transport-level failure (connection refused, reset, retries exhausted)
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The request timed out in the transport
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The transport could not build the request, so it was never sent
    #[error("invalid request: {0}")]
    Request(String),

    /// A redirect was returned and the retry policy raises on redirect
    #[error("redirect {status} to {location:?} not followed")]
    Redirect {
        /// The 3xx status code
        status: u16,
        /// `Location` header of the redirect, when present
        location: Option<String>,
    },

    /// The URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value could not be sent
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be encoded for the selected content type
    #[error("body encoding failed: {0}")]
    Encoding(String),

    /// The response body is not valid JSON
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The mock client received a URL other than the one queued next
    #[error("URL match failed: '{expected}' vs '{actual}'")]
    UrlMismatch {
        /// URL of the queued expectation
        expected: String,
        /// URL passed by the caller
        actual: String,
    },

    /// The mock client was called with no responses queued
    #[error("no mocked response queued for '{url}'")]
    MockExhausted {
        /// URL passed by the caller
        url: String,
    },
}

impl OverEasyError {
    /// Whether a failed attempt may be retried by the client's retry loop.
    ///
    /// Only transport failures and timeouts qualify; request-building, encoding,
    /// URL and redirect errors fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OverEasyError::Http(_) | OverEasyError::Timeout(_))
    }
}

impl From<reqwest::Error> for OverEasyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OverEasyError::Timeout(err.to_string())
        } else if err.is_builder() {
            OverEasyError::Request(err.to_string())
        } else {
            OverEasyError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_both_urls() {
        let err = OverEasyError::UrlMismatch {
            expected: "https://example.com/a".to_string(),
            actual: "https://example.com/b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("URL match failed:"));
        assert!(msg.contains("https://example.com/a"));
        assert!(msg.contains("https://example.com/b"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(OverEasyError::Http("refused".into()).is_retryable());
        assert!(OverEasyError::Timeout("slow".into()).is_retryable());
        assert!(!OverEasyError::Encoding("bad".into()).is_retryable());
        assert!(!OverEasyError::Request("ftp scheme".into()).is_retryable());
        assert!(!OverEasyError::Redirect {
            status: 302,
            location: None
        }
        .is_retryable());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: OverEasyError = serde_json::from_str::<serde_json::Value>("")
            .unwrap_err()
            .into();
        assert!(matches!(err, OverEasyError::Json(_)));
    }
}
