#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pomelli_adapters::MockAdapter;
use pomelli_api::auth::jwt::JwtConfig;
use pomelli_api::config::ServerConfig;
use pomelli_api::router::build_app_router;
use pomelli_api::state::AppState;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const TEST_LOGIN_TOKEN: &str = "letmein";

/// Build a test `ServerConfig` with safe defaults.
///
/// Auth and Baserow are disabled and CORS mirrors any origin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        auth: None,
        openai_api_key: None,
        baserow: None,
        static_dir: None,
    }
}

/// `test_config` with the login stub enabled.
pub fn auth_config() -> ServerConfig {
    ServerConfig {
        auth: Some(JwtConfig {
            secret: TEST_SECRET.to_string(),
            login_token: Some(TEST_LOGIN_TOKEN.to_string()),
            token_expiry_mins: 30,
        }),
        ..test_config()
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the zero-latency mock adapter. The returned state shares the job
/// store and queue with the router so tests can wait for the queue to drain.
pub fn build_test_app(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::new(config.clone(), Arc::new(MockAdapter::without_delay()))
        .expect("state construction should succeed");
    let app = build_app_router(state.clone(), &config);
    (app, state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Spawn a throwaway axum server on `127.0.0.1:0` and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
