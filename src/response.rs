//! Read-only wrapper around a completed HTTP exchange.
//!
//! A [`Response`] is built once per call, either from a live `reqwest` response
//! by [`HttpClient`](crate::HttpClient) or from canned parts by
//! [`ClientMocker`](crate::ClientMocker), and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use overeasy_http::{Headers, Response};
//!
//! let resp = Response::from_parts(200, Headers::new(), Some("{}".into()));
//! assert!(resp.has_success());
//! assert_eq!(resp.text(), "{}");
//! assert!(resp.json().unwrap().as_object().unwrap().is_empty());
//! ```
//!
//! # JSON policy
//!
//! [`Response::json`] propagates decode failures as
//! [`OverEasyError::Json`](crate::OverEasyError::Json). An empty body is not
//! JSON and fails the same way; it never yields `null`.

use crate::error::Result;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Header mapping, name to value.
pub type Headers = BTreeMap<String, String>;

/// Response to a single HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Option<Bytes>,
}

impl Response {
    /// Build a response from its status, headers and optional body.
    ///
    /// Header names are stored exactly as given.
    pub fn from_parts(status: u16, headers: Headers, body: Option<Bytes>) -> Self {
        Response {
            status,
            headers,
            body,
        }
    }

    /// Drain a `reqwest` response into a wrapper.
    ///
    /// Repeated header names are folded into a single `", "`-joined value.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let body = response.bytes().await?;

        Ok(Self::from_parts(status, headers, Some(body)))
    }

    /// Status code of the response.
    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers as received from the transport.
    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Look up a single header, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Raw body bytes; empty when the response carried no body.
    pub fn bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// UTF-8 decoded body.
    ///
    /// Returns an empty string for an absent or empty body. Invalid sequences are
    /// replaced with U+FFFD rather than failing.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes()).into_owned()
    }

    /// True when the status code is in `200..300`.
    pub fn has_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// [`OverEasyError::Json`](crate::OverEasyError::Json) when the body is empty or
    /// not valid JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.text())?)
    }

    /// Parse the body as JSON into any deserializable type.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverEasyError;

    fn resp_headers() -> Headers {
        [
            ("Date", "Mon, 29, Jan 2022 12:00:00 GMT"),
            ("Server", "EggCarton v1 (endless)"),
            ("Content-Length", "0"),
            ("Content-Type", "application/json"),
            ("Connection", "closed"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn response(status: u16, body: Option<&'static [u8]>) -> Response {
        Response::from_parts(status, resp_headers(), body.map(Bytes::from_static))
    }

    #[test]
    fn test_headers_kept_as_received() {
        let resp = response(200, Some(b"{}"));
        assert_eq!(resp.headers(), &resp_headers());
        assert!(resp.headers().contains_key("Content-Type"));
        assert!(!resp.headers().contains_key("content-type"));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let resp = response(200, None);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("SERVER"), Some("EggCarton v1 (endless)"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_has_success_boundaries() {
        assert!(!response(199, None).has_success());
        assert!(response(200, None).has_success());
        assert!(response(299, None).has_success());
        assert!(!response(300, None).has_success());
        assert!(!response(404, Some(b"Not Found")).has_success());
        assert!(!response(500, Some(b"{}")).has_success());
    }

    #[test]
    fn test_text_of_missing_or_empty_body() {
        assert_eq!(response(200, None).text(), "");
        assert_eq!(response(200, Some(b"")).text(), "");
        assert!(response(200, None).bytes().is_empty());
    }

    #[test]
    fn test_text_decodes_utf8() {
        let resp = response(202, Some("Succes was found. \u{00e9}".as_bytes()));
        assert_eq!(resp.text(), "Succes was found. \u{00e9}");
    }

    #[test]
    fn test_status_code() {
        assert_eq!(response(508, None).status(), 508);
    }

    #[test]
    fn test_json_object() {
        let resp = response(201, Some(br#"{"key": "value"}"#));
        let value = resp.json().unwrap();
        assert_eq!(value["key"], "value");

        let empty = response(200, Some(b"{}")).json().unwrap();
        assert!(empty.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_json_on_error_status_still_parses() {
        let resp = response(500, Some(br#"{"error": "error"}"#));
        assert!(resp.json().unwrap().is_object());
    }

    #[test]
    fn test_json_failures() {
        for body in [
            None,
            Some(&b""[..]),
            Some(&b"Succes was found."[..]),
            Some(&br#"{"key": "value}"#[..]),
            Some(&br#"{"error": "error""#[..]),
        ] {
            let err = response(200, body).json().unwrap_err();
            assert!(matches!(err, OverEasyError::Json(_)), "{body:?}");
        }
    }

    #[test]
    fn test_json_as_typed() {
        #[derive(serde::Deserialize)]
        struct Payload {
            key: String,
        }

        let resp = response(200, Some(br#"{"key": "value"}"#));
        let payload: Payload = resp.json_as().unwrap();
        assert_eq!(payload.key, "value");
    }
}
