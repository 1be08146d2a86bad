//! Main HTTP client implementation.
//!
//! Provides [`HttpClient`], a thin facade over a pooled `reqwest` client with a
//! fixed retry policy.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```ignore
//! use overeasy_http::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> overeasy_http::Result<()> {
//!     let client = HttpClient::new()?;
//!     let response = client.get("https://example.com/api/data", None, None).await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## JSON POST with client-wide headers
//!
//! ```ignore
//! use overeasy_http::{Headers, HttpClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> overeasy_http::Result<()> {
//!     let mut headers = Headers::new();
//!     headers.insert("Content-Type".into(), "application/json".into());
//!
//!     let client = HttpClient::with_headers(headers)?;
//!     let response = client
//!         .post("https://example.com/api/data", Some(&json!({"a": 1})), None)
//!         .await?;
//!     println!("Created: {}", response.has_success());
//!     Ok(())
//! }
//! ```

use super::config::ClientConfig;
use super::headers::{self, BodyEncoding, CONTENT_TYPE, FORM_URLENCODED};
use super::retry::{RetryDecision, RetryState};
use super::utils::is_redirect_status;
use crate::error::{OverEasyError, Result};
use crate::response::{Headers, Response};
use bytes::Bytes;
use http::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Pooled HTTP client with retry defaults.
///
/// Cloning is cheap and clones share the connection pool. The client is safe to
/// use from many tasks at once.
///
/// # Header semantics
///
/// Default headers are lower-cased once, at construction. Headers passed to a
/// verb method are lower-cased too and **replace** the defaults for that call.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpClient {
    /// Create a client with default configuration and no default headers.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client that sends `headers` on every call without its own.
    pub fn with_headers(headers: Headers) -> Result<Self> {
        Self::with_config(ClientConfig::default().with_headers(headers))
    }

    /// Create a client with custom configuration.
    ///
    /// `config.default_headers` is stored lower-cased, so [`config`](Self::config)
    /// and [`headers`](Self::headers) agree.
    pub fn with_config(mut config: ClientConfig) -> Result<Self> {
        let client = build_transport(&config)?;
        config.default_headers = headers::format_headers(&config.default_headers);

        Ok(HttpClient {
            client,
            config: Arc::new(config),
        })
    }

    /// Default headers, normalized; `None` when the client has none.
    pub fn headers(&self) -> Option<&Headers> {
        if self.config.default_headers.is_empty() {
            None
        } else {
            Some(&self.config.default_headers)
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Drop pooled connections by replacing the transport with a fresh one.
    ///
    /// Clones made before the call keep the old pool alive until they are dropped.
    pub fn clear(&mut self) -> Result<()> {
        self.client = build_transport(&self.config)?;
        Ok(())
    }

    /// GET `url`, with `fields` appended as query parameters.
    pub async fn get(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        self.request(Method::GET, url, None, fields, headers).await
    }

    /// DELETE `url`, with `fields` appended as query parameters.
    pub async fn delete(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        self.request(Method::DELETE, url, None, fields, headers).await
    }

    /// POST `body` to `url`.
    ///
    /// The body is sent as JSON when the effective `content-type` contains
    /// `json`, form-urlencoded otherwise.
    pub async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        self.request(Method::POST, url, body, None, headers).await
    }

    /// PUT `body` to `url`. Encoding follows [`post`](Self::post).
    pub async fn put(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        self.request(Method::PUT, url, body, None, headers).await
    }

    /// PATCH `body` to `url`. Encoding follows [`post`](Self::post).
    pub async fn patch(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        self.request(Method::PATCH, url, body, None, headers).await
    }

    /// Send a request with any method.
    ///
    /// `body` is encoded per the effective headers; `fields` are appended to the
    /// query string. HTTP error statuses come back as `Ok(Response)`.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        let headers = match headers {
            Some(h) => headers::format_headers(h),
            None => self.config.default_headers.clone(),
        };

        let mut target = Url::parse(url)?;
        if let Some(fields) = fields {
            let pairs = headers::form_pairs(fields)?;
            if !pairs.is_empty() {
                target.query_pairs_mut().extend_pairs(pairs);
            }
        }

        let encoding = headers::body_encoding(&headers);
        let payload = match body {
            Some(body) => Some(Bytes::from(headers::encode_body(body, encoding)?)),
            None => None,
        };

        let mut header_map = to_header_map(&headers)?;
        if payload.is_some()
            && encoding == BodyEncoding::FormUrlEncoded
            && !headers.contains_key(CONTENT_TYPE)
        {
            header_map.insert(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static(FORM_URLENCODED),
            );
        }

        tracing::debug!(
            method = %method,
            url = %target,
            encoding = ?payload.as_ref().map(|_| encoding),
            "sending request"
        );

        self.send_with_retries(method, target, header_map, payload)
            .await
    }

    /// Internal send loop applying the retry policy
    async fn send_with_retries(
        &self,
        method: Method,
        target: Url,
        header_map: HeaderMap,
        payload: Option<Bytes>,
    ) -> Result<Response> {
        let policy = &self.config.retry;
        let mut state = RetryState::new();

        loop {
            let mut req_builder = self
                .client
                .request(method.clone(), target.clone())
                .headers(header_map.clone());
            if let Some(payload) = &payload {
                req_builder = req_builder.body(payload.clone());
            }

            let cause = match req_builder.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if policy.raise_on_redirect && is_redirect_status(status) {
                        let location = response
                            .headers()
                            .get(reqwest::header::LOCATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        return Err(OverEasyError::Redirect { status, location });
                    }

                    if !policy.retries_status(status) {
                        return Response::from_reqwest(response).await;
                    }

                    match state.record_failure(policy, &method) {
                        RetryDecision::Retry(delay) => {
                            self.log_retry(&state, delay, &format!("status {}", status));
                            sleep(delay).await;
                            continue;
                        }
                        RetryDecision::GiveUp
                            if policy.raise_on_status && policy.allows_method(&method) =>
                        {
                            return Err(OverEasyError::Http(format!(
                                "max retries exceeded for {} {}: last status {}",
                                method, target, status
                            )));
                        }
                        RetryDecision::GiveUp => return Response::from_reqwest(response).await,
                    }
                }
                Err(e) => OverEasyError::from(e),
            };

            if !cause.is_retryable() {
                return Err(cause);
            }
            match state.record_failure(policy, &method) {
                RetryDecision::Retry(delay) => {
                    self.log_retry(&state, delay, &cause.to_string());
                    sleep(delay).await;
                }
                RetryDecision::GiveUp => return Err(cause),
            }
        }
    }

    fn log_retry(&self, state: &RetryState, delay: Duration, cause: &str) {
        if self.config.enable_logging {
            tracing::warn!(
                "Request failed (attempt {}), retrying after {:?}: {}",
                state.errors(),
                delay,
                cause
            );
        }
    }
}

fn build_transport(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(config.max_pool)
        .redirect(reqwest::redirect::Policy::none());

    if let Some(timeout_ms) = config.request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    builder
        .build()
        .map_err(|e| OverEasyError::Http(e.to_string()))
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| OverEasyError::InvalidHeader(format!("Invalid header name: {}", name)))?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            OverEasyError::InvalidHeader(format!("Invalid value for header {}", name))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
