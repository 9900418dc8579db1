#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use envprobe::envprobe::environment::StaticEnvironment;
use envprobe::envprobe::{build_router, Config, ProbeState};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub fn app_with(env: StaticEnvironment) -> Router {
    app_with_config(Config::default(), env)
}

pub fn app_with_config(config: Config, env: StaticEnvironment) -> Router {
    build_router(Arc::new(ProbeState::new(config, Arc::new(env))))
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(req).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
