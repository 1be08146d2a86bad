//! HTTP client facade.
//!
//! This module provides the pooled client and the pieces it is built from:
//!
//! - **Verb methods** (`get`, `delete`, `post`, `put`, `patch`) returning [`Response`]
//! - **Header normalization** (lower-cased names, per-call replacement)
//! - **Body encoding** chosen from the `content-type` header
//! - **Automatic retry** with exponential backoff on `500/502/503/504`
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch        - HttpClient and HTTP operations
//! ├── headers      - header normalization and body encoding
//! ├── retry        - RetryPolicy and per-call RetryState
//! ├── config       - Client configuration
//! └── utils        - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HttpClient`] | Pooled client over `reqwest` |
//! | [`RestClient`] | Verb methods shared by the client and the mock |
//! | [`ClientConfig`] | Client configuration options |
//! | [`RetryPolicy`] | Retry and backoff settings |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use overeasy_http::client::{ClientConfig, HttpClient, RetryPolicy};
//!
//! // Default configuration
//! let client = HttpClient::new().unwrap();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     max_pool: 2,
//!     retry: RetryPolicy { backoff_factor: 0.5, ..Default::default() },
//!     ..Default::default()
//! };
//! let client = HttpClient::with_config(config).unwrap();
//! ```
//!
//! ## Writing code that accepts either client
//!
//! ```
//! use overeasy_http::{ClientMocker, Headers, RestClient};
//!
//! async fn fetch_status(client: &dyn RestClient, url: &str) -> overeasy_http::Result<u16> {
//!     Ok(client.get(url, None, None).await?.status())
//! }
//!
//! let mock = ClientMocker::new();
//! mock.add_response("ok", Headers::new(), 204, "https://example.com/ping");
//! let status = tokio_test::block_on(fetch_status(&mock, "https://example.com/ping")).unwrap();
//! assert_eq!(status, 204);
//! ```

mod config;
mod fetch;
mod headers;
mod retry;
mod utils;

pub use config::{ClientConfig, DEFAULT_MAX_POOL, DEFAULT_TIMEOUT_MS};
pub use fetch::HttpClient;
pub use headers::{
    body_encoding, encode_body, form_pairs, form_urlencode, format_headers, is_urlencoded,
    BodyEncoding, CONTENT_TYPE, FORM_URLENCODED,
};
pub use retry::{
    RetryDecision, RetryPolicy, RetryState, RETRY_ALLOWED_METHODS, RETRY_BACKOFF_FACTOR,
    RETRY_BACKOFF_MAX, RETRY_RAISE_ON_REDIRECT, RETRY_RAISE_ON_STATUS, RETRY_STATUS_FORCELIST,
    RETRY_TOTAL,
};
pub use utils::*;

use crate::error::Result;
use crate::response::{Headers, Response};
use async_trait::async_trait;
use serde_json::Value;

/// The verb methods of an HTTP client.
///
/// Implemented by [`HttpClient`] and by [`ClientMocker`](crate::ClientMocker), so
/// code written against `&dyn RestClient` can be tested without a network.
///
/// `fields` are query parameters; `body` is encoded per the effective headers.
/// `headers`, when given, replace the client defaults for that call.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET `url`
    async fn get(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response>;

    /// DELETE `url`
    async fn delete(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response>;

    /// POST `body` to `url`
    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response>;

    /// PUT `body` to `url`
    async fn put(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response>;

    /// PATCH `body` to `url`
    async fn patch(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response>;
}

#[async_trait]
impl RestClient for HttpClient {
    async fn get(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        HttpClient::get(self, url, fields, headers).await
    }

    async fn delete(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        HttpClient::delete(self, url, fields, headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        HttpClient::post(self, url, body, headers).await
    }

    async fn put(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        HttpClient::put(self, url, body, headers).await
    }

    async fn patch(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        HttpClient::patch(self, url, body, headers).await
    }
}
