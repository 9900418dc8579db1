use axum::http::{Method, StatusCode};
use envprobe::envprobe::environment::StaticEnvironment;

mod common;

fn assert_common_headers(headers: &axum::http::HeaderMap, origin: &str) {
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["cache-control"], "no-store");
    assert_eq!(headers["access-control-allow-origin"], origin);
    assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_origin_defaults_to_any() {
    let app = common::app_with(StaticEnvironment::new());

    let response = common::send(app.clone(), Method::GET, "/debug_env").await;
    assert_common_headers(response.headers(), "*");

    let response = common::send(app, Method::OPTIONS, "/debug_env").await;
    assert_common_headers(response.headers(), "*");
}

#[tokio::test]
async fn test_origin_reflects_allowed_origin() {
    let app = common::app_with(
        StaticEnvironment::new().with("ALLOWED_ORIGIN", "https://news.example.com"),
    );

    let response = common::send(app.clone(), Method::GET, "/debug_env").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_common_headers(response.headers(), "https://news.example.com");

    let response = common::send(app, Method::OPTIONS, "/debug_env").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_common_headers(response.headers(), "https://news.example.com");
}

#[tokio::test]
async fn test_empty_origin_is_not_any() {
    let app = common::app_with(StaticEnvironment::new().with("ALLOWED_ORIGIN", ""));

    let response = common::send(app.clone(), Method::GET, "/debug_env").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_common_headers(response.headers(), "");
    assert_ne!(response.headers()["access-control-allow-origin"], "*");

    let response = common::send(app, Method::OPTIONS, "/debug_env").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_common_headers(response.headers(), "");
}

#[tokio::test]
async fn test_configured_origin_variable() {
    let config = envprobe::envprobe::Config {
        origin_variable: "CORS_ORIGIN".to_string(),
        ..Default::default()
    };
    let app = common::app_with_config(
        config,
        StaticEnvironment::new()
            .with("ALLOWED_ORIGIN", "https://ignored.example")
            .with("CORS_ORIGIN", "https://used.example"),
    );

    let response = common::send(app, Method::GET, "/debug_info").await;
    assert_common_headers(response.headers(), "https://used.example");
}

#[tokio::test]
async fn test_headers_on_errors() {
    let app = common::app_with(StaticEnvironment::new());

    let response = common::send(app.clone(), Method::GET, "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_common_headers(response.headers(), "*");

    let response = common::send(app, Method::POST, "/debug_env").await;
    assert!(response.status().is_client_error());
    assert_common_headers(response.headers(), "*");
}
