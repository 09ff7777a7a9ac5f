//! Timeout-bounded execution of an assembled request.
//!
//! # Design
//! Each dispatch builds a fresh `ureq::Agent` from the transport settings
//! and the effective timeout, so nothing leaks between logical requests.
//! The agent is configured with `http_status_as_error(false)`: non-2xx
//! statuses come back as data and the success/failure boundary is decided
//! here, after the body has been fully read. ureq's `Body` is an owned
//! value, so the response stream is released on every exit path when it
//! drops.

use std::time::Duration;

use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::error::{Error, StatusError};
use crate::http::{HttpRequest, Method, Response};
use crate::transport::Transport;

/// Execute `request` and classify the outcome.
///
/// 2xx yields `Ok(Response)`. Any other status yields `Error::Status` with
/// the fully-read response embedded, since callers may need the error
/// payload. Failures before a response arrives yield `Error::Transport`
/// (or `Error::RequestConstruction` when the platform rejects the request
/// itself); a response whose body cannot be drained yields
/// `Error::BodyRead`.
pub(crate) fn send(
    request: &HttpRequest,
    transport: &Transport,
    timeout: Duration,
) -> Result<Response, Error> {
    let agent = build_agent(transport, timeout);
    let mut res = execute(&agent, request, transport).map_err(classify)?;

    let status = res.status();
    let status_text = match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    };
    let headers = res
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = res
        .body_mut()
        .read_to_vec()
        .map_err(|e| Error::BodyRead(e.to_string()))?;

    let response = Response {
        status: status.as_u16(),
        status_text: status_text.clone(),
        headers,
        body,
    };
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status(StatusError {
            code: status.as_u16(),
            message: status_text,
            response,
        }))
    }
}

fn build_agent(transport: &Transport, timeout: Duration) -> Agent {
    let mut config = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout));
    if let Some(proxy) = &transport.proxy {
        config = config.proxy(Some(proxy.clone()));
    }
    if transport.insecure {
        config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
    }
    config.build().new_agent()
}

fn execute(
    agent: &Agent,
    request: &HttpRequest,
    transport: &Transport,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let url = request.url.as_str();
    match request.method {
        Method::Get => {
            let builder = apply_headers(agent.get(url), request, transport);
            match &request.body {
                Some(body) => builder.force_send_body().send(body.as_slice()),
                None => builder.call(),
            }
        }
        Method::Delete => {
            let builder = apply_headers(agent.delete(url), request, transport);
            match &request.body {
                Some(body) => builder.force_send_body().send(body.as_slice()),
                None => builder.call(),
            }
        }
        Method::Post => {
            let builder = apply_headers(agent.post(url), request, transport);
            match &request.body {
                Some(body) => builder.send(body.as_slice()),
                None => builder.send_empty(),
            }
        }
        Method::Put => {
            let builder = apply_headers(agent.put(url), request, transport);
            match &request.body {
                Some(body) => builder.send(body.as_slice()),
                None => builder.send_empty(),
            }
        }
        Method::Patch => {
            let builder = apply_headers(agent.patch(url), request, transport);
            match &request.body {
                Some(body) => builder.send(body.as_slice()),
                None => builder.send_empty(),
            }
        }
    }
}

/// Copy the assembled header list onto the builder, plus the proxy auth
/// header when the proxy hop carries credentials.
fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
    transport: &Transport,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(auth) = &transport.proxy_authorization {
        builder = builder.header("Proxy-Authorization", auth.as_str());
    }
    builder
}

fn classify(err: ureq::Error) -> Error {
    match err {
        e @ (ureq::Error::BadUri(_) | ureq::Error::Http(_)) => {
            Error::RequestConstruction(e.to_string())
        }
        e => Error::Transport(e.to_string()),
    }
}
