//! Error types for the request pipeline.
//!
//! # Design
//! One variant per failure class, in pipeline order: URL problems surface
//! before any network activity, transport problems mean no response was
//! obtained, and `Status` means the server was reached but answered with a
//! non-2xx status. `Status` is the only variant that still carries the full
//! response — callers frequently need the error payload the server sent.

use std::fmt;

use crate::http::Response;

/// Errors returned by the submit pipeline and the JSON import helper.
#[derive(Debug)]
pub enum Error {
    /// The target or proxy URL could not be parsed. Raised before any
    /// network activity.
    UrlParse(String),

    /// The outbound request could not be built from valid-looking inputs.
    RequestConstruction(String),

    /// Network, TLS, or timeout failure. No response was obtained.
    Transport(String),

    /// A response arrived but its body stream could not be fully read.
    BodyRead(String),

    /// The server was reached and answered outside 200–299.
    Status(StatusError),

    /// Input to the JSON import helper was not a flat string-valued object.
    JsonParse(String),
}

/// A non-2xx response: status code, status line, and the response itself
/// (headers and fully-read body included).
#[derive(Debug)]
pub struct StatusError {
    pub code: u16,
    pub message: String,
    pub response: Response,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UrlParse(msg) => write!(f, "invalid URL: {msg}"),
            Error::RequestConstruction(msg) => {
                write!(f, "failed to build request: {msg}")
            }
            Error::Transport(msg) => write!(f, "transport failed: {msg}"),
            Error::BodyRead(msg) => write!(f, "failed to read body: {msg}"),
            Error::Status(status) => write!(f, "{status}"),
            Error::JsonParse(msg) => write!(f, "invalid JSON input: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StatusError {}
