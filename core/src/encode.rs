//! Wire encoding helpers: query strings, request bodies, basic auth.
//!
//! # Design
//! All functions here are pure: they borrow their inputs and return fresh
//! values, so a `Request` configuration is never mutated during submission
//! and stays reusable across calls. Body encoding is a closed set of
//! strategies keyed on the Content-Type header; adding a strategy means
//! adding a `BodyEncoding` variant and an arm in `encode_body`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::form_urlencoded;

use crate::store::ValueStore;

/// Content-Type applied to non-GET requests when the caller set none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Split a URL at its first `?`. Returns the base and, when present, the raw
/// query suffix (which may be empty for a URL ending in `?`).
pub fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.find('?') {
        Some(idx) => (&url[..idx], Some(&url[idx + 1..])),
        None => (url, None),
    }
}

/// Decode a raw query string into ordered key/value pairs.
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Encode pairs as `application/x-www-form-urlencoded`, preserving order
/// and duplicates.
pub fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// Body encoding strategy, selected by Content-Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Form,
    Json,
}

impl BodyEncoding {
    /// JSON for the three JSON media types, URL-encoded form for everything
    /// else (including the default). The match is exact: a charset suffix
    /// selects the form branch.
    pub fn for_content_type(content_type: &str) -> BodyEncoding {
        match content_type {
            "application/json" | "text/json" | "text/x-json" => BodyEncoding::Json,
            _ => BodyEncoding::Form,
        }
    }
}

/// Encode `values` as a request body per the Content-Type. `None` when the
/// store is empty — no body is sent in that case.
///
/// The JSON strategy emits a flat object of string values. A JSON object
/// holds one value per key, so multi-valued names collapse to the last
/// value added; this is documented lossy behavior of the JSON path.
pub fn encode_body(content_type: &str, values: &ValueStore) -> Option<Vec<u8>> {
    if values.is_empty() {
        return None;
    }
    match BodyEncoding::for_content_type(content_type) {
        BodyEncoding::Json => {
            let mut object = serde_json::Map::new();
            for (name, value) in values.iter() {
                object.insert(name.to_string(), serde_json::Value::from(value));
            }
            Some(serde_json::Value::Object(object).to_string().into_bytes())
        }
        BodyEncoding::Form => Some(encode_pairs(values.iter()).into_bytes()),
    }
}

/// `Basic base64(user:pass)` header value.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}
