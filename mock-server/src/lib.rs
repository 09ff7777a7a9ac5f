//! Fixture HTTP server for exercising the request client end-to-end.
//!
//! Routes cover the behaviors the client classifies: a plain success, a
//! fixed 404, a query echo, a body echo for every non-GET verb, a
//! basic-auth gate, and a slow endpoint for timeout tests. `run_tls`
//! serves the same routes over HTTPS with a freshly generated self-signed
//! certificate for TLS trust tests.

use std::io;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;

use axum::{
    extract::RawQuery,
    http::{HeaderMap, Method, StatusCode},
    routing::get,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Credentials the `/auth` route accepts.
pub const AUTH_USERNAME: &str = "username";
pub const AUTH_PASSWORD: &str = "password";

/// How long `/delay` sleeps before answering.
pub const DELAY: Duration = Duration::from_millis(250);

/// What `/echo` reflects back about the request it received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: String,
    pub query: String,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get", get(success))
        .route("/missing", get(missing))
        .route("/query", get(query))
        .route(
            "/echo",
            axum::routing::post(echo).put(echo).patch(echo).delete(echo),
        )
        .route("/auth", get(auth))
        .route("/delay", get(delay))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve the fixture routes over HTTPS with a self-signed certificate
/// generated on the spot, so clients that verify certificates must reject
/// the connection. The listener stays in blocking mode; axum-server
/// converts it itself.
pub async fn run_tls(listener: std::net::TcpListener) -> Result<(), std::io::Error> {
    // A single crypto provider is compiled in, but pin it explicitly so
    // server setup never depends on feature unification elsewhere.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let params =
        rcgen::CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .map_err(invalid_data)?;
    let key_pair = rcgen::KeyPair::generate().map_err(invalid_data)?;
    let cert = params.self_signed(&key_pair).map_err(invalid_data)?;
    let config = RustlsConfig::from_pem(
        cert.pem().into_bytes(),
        key_pair.serialize_pem().into_bytes(),
    )
    .await?;

    axum_server::from_tcp_rustls(listener, config)
        .serve(app().into_make_service())
        .await
}

fn invalid_data(err: rcgen::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

async fn success() -> &'static str {
    "SUCCESS"
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 not found")
}

/// Reflect the raw query string exactly as received.
async fn query(RawQuery(query): RawQuery) -> String {
    query.unwrap_or_default()
}

async fn echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(Echo {
        method: method.to_string(),
        content_type,
        query: query.unwrap_or_default(),
        body,
    })
}

async fn auth(headers: HeaderMap) -> Result<&'static str, (StatusCode, &'static str)> {
    let credentials = format!("{AUTH_USERNAME}:{AUTH_PASSWORD}");
    let expected = format!("Basic {}", STANDARD.encode(credentials.as_bytes()));
    let provided = headers.get("authorization").and_then(|v| v.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok("SUCCESS")
    } else {
        Err((StatusCode::UNAUTHORIZED, "401 unauthorized"))
    }
}

async fn delay() -> &'static str {
    tokio::time::sleep(DELAY).await;
    "SUCCESS"
}
