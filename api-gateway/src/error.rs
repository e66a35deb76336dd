//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use spend2earn_common::Spend2EarnError;
use tracing::error;

/// Error returned by handlers, rendered as `{ "error", "code" }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_request",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Spend2EarnError> for ApiError {
    fn from(err: Spend2EarnError) -> Self {
        let (status, code) = match &err {
            Spend2EarnError::Credit(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.code()),
            Spend2EarnError::Tier(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_tier"),
            Spend2EarnError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Spend2EarnError::VersionConflict { .. } => (StatusCode::CONFLICT, "version_conflict"),
            Spend2EarnError::Integration(_) => (StatusCode::BAD_GATEWAY, "integration_unavailable"),
            Spend2EarnError::Storage(_)
            | Spend2EarnError::Config(_)
            | Spend2EarnError::Serialization(_)
            | Spend2EarnError::Internal(_) => {
                error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = match &err {
            // Credit rejections and bad input go back verbatim
            Spend2EarnError::Credit(e) => e.to_string(),
            Spend2EarnError::InvalidRequest(msg) => msg.clone(),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => err.to_string(),
        };

        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.message, "code": self.code })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
