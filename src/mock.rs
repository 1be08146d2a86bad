//! FIFO test double for [`HttpClient`](crate::HttpClient).
//!
//! [`ClientMocker`] replays canned responses in the order they were added. Each
//! verb call consumes the oldest expectation and checks the caller's URL against
//! it; the HTTP method is **not** part of the match. Tests that mix verbs must
//! queue expectations in the exact order the calls happen.
//!
//! The methods actually used are recorded and available through
//! [`ClientMocker::calls`] for tests that want to assert on them.
//!
//! # Examples
//!
//! ```
//! use overeasy_http::{ClientMocker, Headers};
//! use serde_json::json;
//!
//! let mock = ClientMocker::new();
//! mock.add_response(json!({"test": "test"}), Headers::new(), 200, "https://example.com/a");
//!
//! let resp = tokio_test::block_on(mock.get("https://example.com/a", None, None)).unwrap();
//! assert_eq!(resp.text(), r#"{"test":"test"}"#);
//! assert!(mock.is_empty());
//! assert_eq!(mock.called(), 1);
//! ```

use crate::client::RestClient;
use crate::error::{OverEasyError, Result};
use crate::response::{Headers, Response};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Body of a canned response, stored as raw bytes.
///
/// Structured JSON values are serialized; text and byte inputs are stored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBody(Bytes);

impl MockBody {
    /// Stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Value> for MockBody {
    fn from(value: Value) -> Self {
        MockBody(Bytes::from(value.to_string()))
    }
}

impl From<&Value> for MockBody {
    fn from(value: &Value) -> Self {
        MockBody(Bytes::from(value.to_string()))
    }
}

impl From<&str> for MockBody {
    fn from(text: &str) -> Self {
        MockBody(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<String> for MockBody {
    fn from(text: String) -> Self {
        MockBody(Bytes::from(text))
    }
}

impl From<&[u8]> for MockBody {
    fn from(raw: &[u8]) -> Self {
        MockBody(Bytes::copy_from_slice(raw))
    }
}

impl From<Vec<u8>> for MockBody {
    fn from(raw: Vec<u8>) -> Self {
        MockBody(Bytes::from(raw))
    }
}

impl From<Bytes> for MockBody {
    fn from(raw: Bytes) -> Self {
        MockBody(raw)
    }
}

/// One queued interaction.
#[derive(Debug, Clone)]
struct Expectation {
    url: String,
    partial_match: bool,
    body: Bytes,
    headers: Headers,
    status: u16,
}

impl Expectation {
    /// Partial mode checks `expected.starts_with(actual)`: the caller may pass a
    /// prefix of the queued URL.
    fn matches(&self, actual: &str) -> bool {
        if self.partial_match {
            self.url.starts_with(actual)
        } else {
            self.url == actual
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    queue: VecDeque<Expectation>,
    called: usize,
    calls: Vec<(Method, String)>,
}

/// Mock HTTP client for unit tests.
///
/// Intended for sequential tests. The queue sits behind a mutex so the mock can
/// stand in wherever a [`RestClient`] is expected.
#[derive(Debug, Default)]
pub struct ClientMocker {
    state: Mutex<MockState>,
}

impl ClientMocker {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a call to exactly `url`.
    pub fn add_response(
        &self,
        body: impl Into<MockBody>,
        headers: Headers,
        status: u16,
        url: impl Into<String>,
    ) {
        self.push(body.into(), headers, status, url.into(), false);
    }

    /// Queue a response for a call whose URL is a prefix of `url`.
    pub fn add_partial_response(
        &self,
        body: impl Into<MockBody>,
        headers: Headers,
        status: u16,
        url: impl Into<String>,
    ) {
        self.push(body.into(), headers, status, url.into(), true);
    }

    fn push(&self, body: MockBody, headers: Headers, status: u16, url: String, partial_match: bool) {
        self.state.lock().queue.push_back(Expectation {
            url,
            partial_match,
            body: body.0,
            headers,
            status,
        });
    }

    /// True when every queued response has been used.
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    /// Responses still queued.
    pub fn remaining(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Number of verb calls made so far, including failed ones.
    pub fn called(&self) -> usize {
        self.state.lock().called
    }

    /// Method and URL of every call, oldest first.
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.state.lock().calls.clone()
    }

    /// Mocks [`HttpClient::get`](crate::HttpClient::get)
    pub async fn get(
        &self,
        url: &str,
        _fields: Option<&Value>,
        _headers: Option<&Headers>,
    ) -> Result<Response> {
        self.check_call(Method::GET, url)
    }

    /// Mocks [`HttpClient::delete`](crate::HttpClient::delete)
    pub async fn delete(
        &self,
        url: &str,
        _fields: Option<&Value>,
        _headers: Option<&Headers>,
    ) -> Result<Response> {
        self.check_call(Method::DELETE, url)
    }

    /// Mocks [`HttpClient::post`](crate::HttpClient::post)
    pub async fn post(
        &self,
        url: &str,
        _body: Option<&Value>,
        _headers: Option<&Headers>,
    ) -> Result<Response> {
        self.check_call(Method::POST, url)
    }

    /// Mocks [`HttpClient::put`](crate::HttpClient::put)
    pub async fn put(
        &self,
        url: &str,
        _body: Option<&Value>,
        _headers: Option<&Headers>,
    ) -> Result<Response> {
        self.check_call(Method::PUT, url)
    }

    /// Mocks [`HttpClient::patch`](crate::HttpClient::patch)
    pub async fn patch(
        &self,
        url: &str,
        _body: Option<&Value>,
        _headers: Option<&Headers>,
    ) -> Result<Response> {
        self.check_call(Method::PATCH, url)
    }

    /// Pop the oldest expectation and check `url` against it.
    fn check_call(&self, method: Method, url: &str) -> Result<Response> {
        let mut state = self.state.lock();
        state.called += 1;
        state.calls.push((method.clone(), url.to_string()));

        let expectation = state
            .queue
            .pop_front()
            .ok_or_else(|| OverEasyError::MockExhausted {
                url: url.to_string(),
            })?;

        tracing::debug!(
            method = %method,
            expected = %expectation.url,
            actual = %url,
            "consuming mocked response"
        );

        if !expectation.matches(url) {
            return Err(OverEasyError::UrlMismatch {
                expected: expectation.url,
                actual: url.to_string(),
            });
        }

        Ok(Response::from_parts(
            expectation.status,
            expectation.headers,
            Some(expectation.body),
        ))
    }
}

#[async_trait]
impl RestClient for ClientMocker {
    async fn get(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        ClientMocker::get(self, url, fields, headers).await
    }

    async fn delete(
        &self,
        url: &str,
        fields: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        ClientMocker::delete(self, url, fields, headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        ClientMocker::post(self, url, body, headers).await
    }

    async fn put(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        ClientMocker::put(self, url, body, headers).await
    }

    async fn patch(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: Option<&Headers>,
    ) -> Result<Response> {
        ClientMocker::patch(self, url, body, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::block_on;

    const MOCK_STATUS: u16 = 999;
    const MOCK_URL: &str = "https://github.com/overeasy-rs/overeasy-http";

    fn mock_resp() -> Value {
        json!({"test": "test"})
    }

    fn mock_header() -> Headers {
        let mut headers = Headers::new();
        headers.insert("header".into(), "mock".into());
        headers
    }

    #[test]
    fn test_is_empty() {
        let client = ClientMocker::new();
        assert!(client.is_empty());
        assert_eq!(client.called(), 0);
    }

    #[test]
    fn test_is_not_empty() {
        let client = ClientMocker::new();
        client.add_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);
        assert!(!client.is_empty());
        assert_eq!(client.remaining(), 1);
    }

    #[test]
    fn test_add_response_all_calls() {
        for (name, method) in [
            ("get", Method::GET),
            ("put", Method::PUT),
            ("patch", Method::PATCH),
            ("post", Method::POST),
            ("delete", Method::DELETE),
        ] {
            let client = ClientMocker::new();
            client.add_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);

            let result = match name {
                "get" => block_on(client.get(MOCK_URL, None, None)),
                "put" => block_on(client.put(MOCK_URL, None, None)),
                "patch" => block_on(client.patch(MOCK_URL, None, None)),
                "post" => block_on(client.post(MOCK_URL, None, None)),
                _ => block_on(client.delete(MOCK_URL, None, None)),
            }
            .unwrap();

            assert_eq!(result.text(), mock_resp().to_string());
            assert_eq!(result.status(), MOCK_STATUS);
            assert_eq!(result.headers(), &mock_header());
            assert_eq!(client.calls(), vec![(method, MOCK_URL.to_string())]);
        }
    }

    #[test]
    fn test_add_response_list() {
        let client = ClientMocker::new();
        let resp = Value::Array(vec![mock_resp(); 10]);
        client.add_response(&resp, mock_header(), MOCK_STATUS, MOCK_URL);

        let result = block_on(client.get(MOCK_URL, None, None)).unwrap();
        assert_eq!(result.json().unwrap(), resp);
    }

    #[test]
    fn test_body_forms_store_same_bytes() {
        let text = mock_resp().to_string();
        let from_value = MockBody::from(mock_resp());
        let from_str = MockBody::from(text.as_str());
        let from_bytes = MockBody::from(text.clone().into_bytes());

        assert_eq!(from_value, from_str);
        assert_eq!(from_str, from_bytes);
        assert_eq!(from_bytes.as_bytes(), text.as_bytes());
    }

    #[test]
    fn test_add_response_str_and_bytes() {
        let client = ClientMocker::new();
        let text = mock_resp().to_string();
        client.add_response(text.as_str(), mock_header(), MOCK_STATUS, MOCK_URL);
        client.add_response(text.as_bytes(), mock_header(), MOCK_STATUS, MOCK_URL);

        let first = block_on(client.get(MOCK_URL, None, None)).unwrap();
        let second = block_on(client.get(MOCK_URL, None, None)).unwrap();
        assert_eq!(first.text(), text);
        assert_eq!(second.text(), text);
    }

    #[test]
    fn test_url_mismatch() {
        let client = ClientMocker::new();
        client.add_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);

        let err = block_on(client.get("https://github.com", None, None)).unwrap_err();
        match err {
            OverEasyError::UrlMismatch { expected, actual } => {
                assert_eq!(expected, MOCK_URL);
                assert_eq!(actual, "https://github.com");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(client.is_empty());
        assert_eq!(client.called(), 1);
    }

    #[test]
    fn test_url_match_partial() {
        let client = ClientMocker::new();
        client.add_partial_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);

        let result = block_on(client.get(&MOCK_URL[..10], None, None)).unwrap();
        assert_eq!(result.headers(), &mock_header());
    }

    #[test]
    fn test_partial_match_rejects_longer_url() {
        let client = ClientMocker::new();
        client.add_partial_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);

        let longer = format!("{MOCK_URL}/extra");
        let err = block_on(client.get(&longer, None, None)).unwrap_err();
        assert!(matches!(err, OverEasyError::UrlMismatch { .. }));
    }

    #[test]
    fn test_exact_match_rejects_prefix() {
        let client = ClientMocker::new();
        client.add_response(mock_resp(), mock_header(), MOCK_STATUS, MOCK_URL);

        let err = block_on(client.get(&MOCK_URL[..10], None, None)).unwrap_err();
        assert!(matches!(err, OverEasyError::UrlMismatch { .. }));
    }

    #[test]
    fn test_fifo_ignores_verb() {
        let client = ClientMocker::new();
        client.add_response("first", Headers::new(), 200, "https://a.test/1");
        client.add_response("second", Headers::new(), 201, "https://a.test/2");
        client.add_response("third", Headers::new(), 202, "https://a.test/3");

        let first = block_on(client.post("https://a.test/1", None, None)).unwrap();
        let second = block_on(client.delete("https://a.test/2", None, None)).unwrap();
        let third = block_on(client.get("https://a.test/3", None, None)).unwrap();

        assert_eq!(first.text(), "first");
        assert_eq!(second.status(), 201);
        assert_eq!(third.text(), "third");
        assert!(client.is_empty());
        assert_eq!(client.called(), 3);
        assert_eq!(
            client
                .calls()
                .into_iter()
                .map(|(m, _)| m)
                .collect::<Vec<_>>(),
            vec![Method::POST, Method::DELETE, Method::GET]
        );
    }

    #[test]
    fn test_exhausted_queue() {
        let client = ClientMocker::new();
        let err = block_on(client.get(MOCK_URL, None, None)).unwrap_err();
        assert!(matches!(err, OverEasyError::MockExhausted { .. }));
        assert_eq!(client.called(), 1);
    }
}
