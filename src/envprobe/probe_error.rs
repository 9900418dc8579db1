use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no route for {0}")]
    NotFound(String),
}

impl ProbeError {
    pub fn code(&self) -> &'static str {
        match self {
            ProbeError::NotFound(_) => "NotFound",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ProbeError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.http_status();

        debug!(request_id = %request_id, status = %status, "{}", self);

        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
            request_id: request_id.clone(),
        };

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
}
