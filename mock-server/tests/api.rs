use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, AUTH_PASSWORD, AUTH_USERNAME};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- success and status fixtures ---

#[tokio::test]
async fn get_returns_success() {
    let resp = app().oneshot(get_request("/get")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "SUCCESS");
}

#[tokio::test]
async fn missing_returns_404_with_body() {
    let resp = app().oneshot(get_request("/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, "404 not found");
}

// --- query echo ---

#[tokio::test]
async fn query_echoes_raw_query() {
    let resp = app()
        .oneshot(get_request("/query?key=value&key=value&test=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "key=value&key=value&test=true");
}

#[tokio::test]
async fn query_without_query_is_empty() {
    let resp = app().oneshot(get_request("/query")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "");
}

// --- body echo ---

#[tokio::test]
async fn echo_reflects_the_request() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo?x=1")
                .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body("a=1&b=2".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.content_type, "application/x-www-form-urlencoded");
    assert_eq!(echo.query, "x=1");
    assert_eq!(echo.body, "a=1&b=2");
}

#[tokio::test]
async fn echo_answers_every_non_get_verb() {
    for method in ["POST", "PUT", "PATCH", "DELETE"] {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/echo")
                    .body(String::new())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
        assert_eq!(echo.body, "");
    }
}

// --- basic auth ---

#[tokio::test]
async fn auth_accepts_correct_credentials() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let credentials = format!("{AUTH_USERNAME}:{AUTH_PASSWORD}");
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/auth")
                .header(
                    http::header::AUTHORIZATION,
                    format!("Basic {}", STANDARD.encode(credentials.as_bytes())),
                )
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "SUCCESS");
}

#[tokio::test]
async fn auth_rejects_missing_header() {
    let resp = app().oneshot(get_request("/auth")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(resp).await, "401 unauthorized");
}

#[tokio::test]
async fn auth_rejects_wrong_credentials() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/auth")
                .header(http::header::AUTHORIZATION, "Basic d3Jvbmc6d3Jvbmc=")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
