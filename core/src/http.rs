//! Plain-data request and response types.
//!
//! # Design
//! The submit pipeline first assembles an `HttpRequest` as plain data, then
//! hands it to the dispatcher for execution. Keeping the assembled request
//! inspectable as a value means the assembly rules (header copying, auth
//! attachment, query placement) are testable without touching the network.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved
//! around freely and compared in tests.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// An outbound HTTP request described as plain data.
///
/// Produced by request assembly; `url` already carries the final query
/// string when one applies. `headers` is the exact ordered list the
/// dispatcher puts on the wire, platform defaults for the same names are
/// overwritten.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A received HTTP response: status metadata plus the fully-read body.
///
/// Returned on 2xx; embedded in `StatusError` for any other status so the
/// error payload stays reachable.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Status line text, e.g. `404 Not Found`.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}
