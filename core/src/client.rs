//! Request configuration and the submit pipeline.
//!
//! # Design
//! `Request` owns everything needed for one outbound exchange: target URL,
//! credentials, timeout, proxy, TLS trust flag, and the header/value
//! stores. Each verb is split into a `build_*` step that produces an
//! inspectable `HttpRequest` and a dispatch step that executes it, so the
//! assembly rules are testable without a server.
//!
//! Submission takes `&self` and never mutates the configuration: inline
//! URL queries are stripped and merged through pure helpers, and the
//! Content-Type default is applied to the outbound request only. A single
//! configured `Request` is therefore reusable across calls.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::encode::{
    basic_auth_value, encode_body, encode_pairs, parse_query, split_query, DEFAULT_CONTENT_TYPE,
};
use crate::error::Error;
use crate::http::{HttpRequest, Method, Response};
use crate::send::send;
use crate::store::{HeaderStore, ValueStore};
use crate::transport::Transport;

/// Timeout applied when the caller leaves `timeout_millis` at zero.
///
/// Deliberately short and suited to local or test use; callers targeting
/// real networks must set an explicit timeout.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10;

/// Proxy settings for the transport hop. An empty URL means no proxy.
/// Credentials attach only when both fields are non-empty.
#[derive(Debug, Clone, Default)]
pub struct Proxy {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Configuration for one outbound HTTP request.
///
/// Basic-auth credentials follow both-or-neither semantics: the
/// `Authorization` header is attached only when `username` and `password`
/// are both non-empty. Header names are matched exactly (`Content-Type`,
/// not `content-type`) when the stores are consulted.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Request timeout in milliseconds. Zero resolves to
    /// `DEFAULT_TIMEOUT_MILLIS`.
    pub timeout_millis: u64,
    /// Skip certificate verification for `https` targets.
    pub insecure: bool,
    pub proxy: Proxy,
    header: HeaderStore,
    values: ValueStore,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Request {
            url: url.into(),
            ..Request::default()
        }
    }

    /// Headers sent with the request.
    pub fn header(&mut self) -> &mut HeaderStore {
        &mut self.header
    }

    /// Parameters sent with the request, as query or body depending on the
    /// verb.
    pub fn values(&mut self) -> &mut ValueStore {
        &mut self.values
    }

    /// Import a flat JSON object of string values: every pair lands in the
    /// value store and the Content-Type header is set to
    /// `application/json`. Anything that is not a flat string-valued
    /// object — a bare string, an array, nested values — is rejected with
    /// `Error::JsonParse`. Composable with direct store manipulation.
    pub fn json(&mut self, input: &[u8]) -> Result<(), Error> {
        let fields: BTreeMap<String, String> =
            serde_json::from_slice(input).map_err(|e| Error::JsonParse(e.to_string()))?;
        for (name, value) in fields {
            self.values.add(name, value);
        }
        self.header.add("Content-Type", "application/json");
        Ok(())
    }

    /// Send a GET request. Any inline `?query` on the URL is merged with
    /// the value store (caller-added pairs first, duplicates preserved)
    /// and re-encoded onto the final URL.
    pub fn get(&self) -> Result<Response, Error> {
        let req = self.build_get()?;
        self.dispatch(&req)
    }

    pub fn post(&self) -> Result<Response, Error> {
        self.submit(Method::Post)
    }

    pub fn put(&self) -> Result<Response, Error> {
        self.submit(Method::Put)
    }

    pub fn patch(&self) -> Result<Response, Error> {
        self.submit(Method::Patch)
    }

    pub fn delete(&self) -> Result<Response, Error> {
        self.submit(Method::Delete)
    }

    /// Send with an explicit method through the body pipeline: the value
    /// store becomes the request body (form- or JSON-encoded per the
    /// Content-Type header), while any inline URL query is re-encoded and
    /// kept on the URL.
    pub fn submit(&self, method: Method) -> Result<Response, Error> {
        let req = self.build_submit(method)?;
        self.dispatch(&req)
    }

    /// Timeout for the exchange: `timeout_millis` when positive, the
    /// short default otherwise.
    pub fn effective_timeout(&self) -> Duration {
        let millis = if self.timeout_millis == 0 {
            DEFAULT_TIMEOUT_MILLIS
        } else {
            self.timeout_millis
        };
        Duration::from_millis(millis)
    }

    fn build_get(&self) -> Result<HttpRequest, Error> {
        let (base, inline) = split_query(&self.url);
        let mut merged = self.values.clone();
        if let Some(raw) = inline {
            for (name, value) in parse_query(raw) {
                merged.add(name, value);
            }
        }
        let query = if merged.is_empty() {
            None
        } else {
            Some(encode_pairs(merged.iter()))
        };
        self.assemble(Method::Get, base, query, None, None)
    }

    fn build_submit(&self, method: Method) -> Result<HttpRequest, Error> {
        let (base, inline) = split_query(&self.url);
        // The inline query is decoded and freshly re-encoded, never passed
        // through verbatim. It stays on the URL; only the value store
        // feeds the body.
        let query = inline
            .map(|raw| encode_pairs(parse_query(raw).iter().map(|(k, v)| (k.as_str(), v.as_str()))))
            .filter(|q| !q.is_empty());

        let stored = self.header.get("Content-Type");
        let content_type = if stored.is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            stored
        };
        let body = encode_body(content_type, &self.values);

        self.assemble(method, base, query, body, Some(content_type))
    }

    /// Build the outbound request: validated URL with the final query
    /// attached, every header store entry copied over, basic auth when
    /// both credentials are set.
    fn assemble(
        &self,
        method: Method,
        base: &str,
        query: Option<String>,
        body: Option<Vec<u8>>,
        content_type: Option<&str>,
    ) -> Result<HttpRequest, Error> {
        Url::parse(base).map_err(|e| Error::UrlParse(format!("{base}: {e}")))?;

        let mut headers: Vec<(String, String)> = self
            .header
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        if let Some(ct) = content_type {
            if self.header.get("Content-Type").is_empty() {
                headers.push(("Content-Type".to_string(), ct.to_string()));
            }
        }
        if !self.username.is_empty() && !self.password.is_empty() {
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
            headers.push((
                "Authorization".to_string(),
                basic_auth_value(&self.username, &self.password),
            ));
        }

        let url = match query {
            Some(q) => format!("{base}?{q}"),
            None => base.to_string(),
        };
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn dispatch(&self, req: &HttpRequest) -> Result<Response, Error> {
        let transport = Transport::for_request(self)?;
        send(req, &transport, self.effective_timeout())
    }
}
