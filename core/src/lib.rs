//! Client-side HTTP request builder and dispatcher.
//!
//! # Overview
//! A `Request` gathers a target URL, headers, multi-valued parameters,
//! basic-auth credentials, proxy and TLS trust settings, and a timeout,
//! then sends itself with one of the verb methods. The pipeline merges
//! inline URL queries with caller-added values, picks a body encoding from
//! the Content-Type header (URL-encoded form or a flat JSON object), and
//! classifies the outcome: 2xx is `Ok`, anything else is an error that
//! still carries the full response.
//!
//! # Design
//! - Submission takes `&self`: the configuration is never mutated, so one
//!   `Request` is reusable across calls.
//! - Assembly produces a plain-data `HttpRequest` before dispatch, keeping
//!   the assembly rules testable without a server.
//! - Timeouts, proxying, and TLS are delegated to a per-dispatch
//!   `ureq::Agent`; nothing is retried or cached internally.

pub mod client;
pub mod encode;
pub mod error;
pub mod http;
mod send;
pub mod store;
pub mod transport;

pub use client::{Proxy, Request, DEFAULT_TIMEOUT_MILLIS};
pub use encode::{BodyEncoding, DEFAULT_CONTENT_TYPE};
pub use error::{Error, StatusError};
pub use http::{HttpRequest, Method, Response};
pub use store::{HeaderStore, ValueStore};
pub use transport::Transport;
