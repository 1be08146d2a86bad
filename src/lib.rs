#![warn(missing_docs)]

//! # overeasy_http: HTTP made over-easy
//!
//! A thin convenience layer over a pooled `reqwest` client.
//!
//! ## Overview
//!
//! The crate adds three things on top of the transport:
//!
//! 1. **[`HttpClient`]** - verb methods with lower-cased headers, a fixed retry
//!    policy and JSON or form-urlencoded bodies chosen from `content-type`
//! 2. **[`Response`]** - status, headers, text and JSON accessors over one exchange
//! 3. **[`ClientMocker`]** - a FIFO queue of canned responses for tests
//!
//! HTTP error statuses are ordinary responses. Only failures of the call itself
//! (connection, timeout, redirect, encoding, bad URL) produce an [`OverEasyError`].
//!
//! ## Key Features
//!
//! - **Retry defaults**: 3 retries, backoff factor 2s, retry on `500/502/503/504`
//! - **Raise on redirect**: 3xx responses surface as [`OverEasyError::Redirect`]
//! - **Header override**: per-call headers replace the defaults, they do not merge
//! - **Body selection**: `content-type` containing `json` sends JSON, anything else
//!   (or nothing) sends `application/x-www-form-urlencoded`
//! - **Swappable**: [`RestClient`] is implemented by both the client and the mock
//!
//! ## Client Usage
//!
//! ```ignore
//! use overeasy_http::{Headers, HttpClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> overeasy_http::Result<()> {
//!     let mut headers = Headers::new();
//!     headers.insert("Content-Type".into(), "application/json".into());
//!     let client = HttpClient::with_headers(headers)?;
//!
//!     let response = client
//!         .post("https://example.com/hook", Some(&json!({"text": "Hello"})), None)
//!         .await?;
//!
//!     if response.has_success() {
//!         println!("{}", response.json()?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without a Network
//!
//! ```
//! use overeasy_http::{ClientMocker, Headers};
//!
//! let mock = ClientMocker::new();
//! mock.add_response(r#"{"ok": true}"#, Headers::new(), 200, "https://example.com/hook");
//!
//! let response = tokio_test::block_on(mock.post("https://example.com/hook", None, None)).unwrap();
//! assert_eq!(response.json().unwrap()["ok"], true);
//! assert!(mock.is_empty());
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - HTTP client, configuration, retry policy and body encoding
//! - **[response]** - Response wrapper
//! - **[mock]** - FIFO test double
//! - **[error]** - Error types and result handling

pub mod client;
pub mod error;
pub mod mock;
pub mod response;

pub use client::{ClientConfig, HttpClient, RestClient, RetryPolicy};
pub use error::{OverEasyError, Result};
pub use mock::{ClientMocker, MockBody};
pub use response::{Headers, Response};
