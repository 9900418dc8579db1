use std::sync::Arc;

use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL, CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use tower::{Layer, Service};
use tracing::warn;

use super::ProbeState;

pub const ANY_ORIGIN: &str = "*";
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Stamps the JSON, no-store and CORS headers on every response from the
/// wrapped service. The origin is looked up per request.
#[derive(Clone)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
    state: Arc<ProbeState>,
}

impl<S> CorsHeadersMiddleware<S> {
    pub fn new(inner: S, state: Arc<ProbeState>) -> Self {
        Self { inner, state }
    }
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let state = self.state.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let origin = state
                .environment
                .var(&state.config.origin_variable);
            apply_common_headers(response.headers_mut(), origin.as_deref());
            Ok(response)
        })
    }
}

#[derive(Clone)]
pub struct CorsHeadersLayer {
    state: Arc<ProbeState>,
}

impl CorsHeadersLayer {
    pub fn new(state: Arc<ProbeState>) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware::new(inner, self.state.clone())
    }
}

/// Preflight for every debug route. The headers come from `CorsHeadersLayer`.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Unset origin means any origin.
pub fn origin_header(origin: Option<&str>) -> HeaderValue {
    match origin {
        None => HeaderValue::from_static(ANY_ORIGIN),
        Some(origin) => HeaderValue::from_str(origin).unwrap_or_else(|_| {
            warn!("allowed origin is not a valid header value, falling back to {}", ANY_ORIGIN);
            HeaderValue::from_static(ANY_ORIGIN)
        }),
    }
}

pub fn apply_common_headers(headers: &mut HeaderMap, origin: Option<&str>) {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin_header(origin));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}
