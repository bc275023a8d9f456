//! Shared integration test harness.
//!
//! Builds the production router over a per-test database pool, with the
//! log-only mailer standing in for SMTP, plus small request helpers so
//! tests read as scenario steps.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use quill_api::config::ServerConfig;
use quill_api::mailer::LogMailer;
use quill_api::router::build_app_router;
use quill_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults. SMTP is unset, so
/// verification emails go to the log.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_domain: "localhost:3000".to_string(),
        email_domain: "test.edu".to_string(),
        development: true,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        mail: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors `main.rs` router construction so integration tests exercise the
/// same stack (request ID, timeout, tracing, panic recovery, session
/// loading) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let mailer = Arc::new(LogMailer {
        scheme: config.scheme().to_string(),
        base_domain: config.base_domain.clone(),
    });

    let state = AppState::new(pool, config.clone(), mailer);
    build_app_router(state, &config)
}

/// Issue a GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a GET request carrying a `Cookie` header.
pub async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a POST request with a JSON body and a `Cookie` header.
pub async fn post_json_with_cookie(
    app: Router,
    path: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// The first `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().expect("cookie should be ASCII").to_string())
}

/// The `name=value` pair from a `Set-Cookie` header, suitable for echoing
/// back in a `Cookie` request header.
pub fn cookie_pair(set_cookie_header: &str) -> String {
    set_cookie_header
        .split(';')
        .next()
        .expect("Set-Cookie should have a value")
        .to_string()
}
