//! Header normalization and request body encoding.
//!
//! # Rules
//!
//! | Concern | Rule |
//! |---------|------|
//! | Header names | Lower-cased before storage or use; values untouched |
//! | Per-call headers | Replace the client defaults entirely (no merge) |
//! | Body encoding | JSON when `content-type` contains `json`, form-urlencoded otherwise |
//!
//! # Form encoding
//!
//! Bodies and query fields are JSON objects. Each member becomes one or more
//! `key=value` pairs:
//!
//! | Value | Encoded as |
//! |-------|------------|
//! | string | the string |
//! | number / bool | its JSON text (`1`, `true`) |
//! | `null` | empty value |
//! | array | one pair per element, same key |
//! | object | its JSON text |
//!
//! ```
//! use overeasy_http::client::form_urlencode;
//! use serde_json::json;
//!
//! let encoded = form_urlencode(&json!({"a": 1, "tag": ["x", "y z"]})).unwrap();
//! assert_eq!(encoded, "a=1&tag=x&tag=y+z");
//! ```

use crate::error::{OverEasyError, Result};
use crate::response::Headers;
use serde_json::Value;
use url::form_urlencoded;

/// Name of the content type header after normalization.
pub const CONTENT_TYPE: &str = "content-type";

/// Content type sent with form-encoded bodies when none was given.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// How a request body is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `serde_json` text
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
}

/// Lower-case every header name. Values pass through unchanged.
///
/// Idempotent: normalizing twice gives the same map.
pub fn format_headers<'a, I>(headers: I) -> Headers
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    headers
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value.clone()))
        .collect()
}

/// Pick the body encoding from already-normalized headers.
pub fn body_encoding(headers: &Headers) -> BodyEncoding {
    match headers.get(CONTENT_TYPE) {
        Some(content_type) if content_type.contains("json") => BodyEncoding::Json,
        _ => BodyEncoding::FormUrlEncoded,
    }
}

/// Whether a body would be sent form-urlencoded under these headers.
#[inline]
pub fn is_urlencoded(headers: &Headers) -> bool {
    body_encoding(headers) == BodyEncoding::FormUrlEncoded
}

/// Serialize a body with the given encoding.
pub fn encode_body(body: &Value, encoding: BodyEncoding) -> Result<String> {
    match encoding {
        BodyEncoding::Json => {
            serde_json::to_string(body).map_err(|e| OverEasyError::Encoding(e.to_string()))
        }
        BodyEncoding::FormUrlEncoded => form_urlencode(body),
    }
}

/// Flatten a JSON object into ordered `(key, value)` pairs.
///
/// # Errors
///
/// [`OverEasyError::Encoding`] when `value` is not an object.
pub fn form_pairs(value: &Value) -> Result<Vec<(String, String)>> {
    let object = value.as_object().ok_or_else(|| {
        OverEasyError::Encoding(format!(
            "form fields must be a JSON object, got {}",
            kind_of(value)
        ))
    })?;

    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_text(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    Ok(pairs)
}

/// Encode a JSON object as `application/x-www-form-urlencoded` text.
pub fn form_urlencode(value: &Value) -> Result<String> {
    let pairs = form_pairs(value)?;
    Ok(form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
