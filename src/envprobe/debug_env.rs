use std::sync::Arc;

use axum::response::IntoResponse;
use axum::{Extension, Json};
use hyper::StatusCode;
use tracing::debug;

use super::key_status::KeyStatus;
use super::ProbeState;

/// Reports whether the key variable is set and how long it is.
pub async fn handle(state: Extension<Arc<ProbeState>>) -> impl IntoResponse {
    let value = state.environment.var(&state.config.key_variable);
    let status = KeyStatus::inspect(value.as_deref());

    debug!(
        variable = %state.config.key_variable,
        has_key = status.has_key,
        "reporting key status"
    );

    (StatusCode::OK, Json(status))
}
