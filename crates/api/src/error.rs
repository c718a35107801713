//! Rendering of taxonomy errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bankroll_shared::{AppError, ErrorCode};
use serde_json::json;
use tracing::{error, warn};

/// Generic text shown in place of the detailed message.
pub const GENERIC_ERROR_MESSAGE: &str = "Malformed request. Error has been logged.";

/// A taxonomy error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.status_class().http_status())
            .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);

        match err.code() {
            ErrorCode::Database | ErrorCode::Unknown => error!(
                code = err.code().as_u16(),
                kind = err.code().name(),
                status = status.as_u16(),
                error = %err,
                source = ?std::error::Error::source(&err),
                "Request failed"
            ),
            _ => warn!(
                code = err.code().as_u16(),
                kind = err.code().name(),
                status = status.as_u16(),
                error = %err,
                "Request rejected"
            ),
        }

        let body = json!({
            "error": {
                "code": status.as_u16(),
                "message": GENERIC_ERROR_MESSAGE,
                "realMessage": err.to_string(),
            }
        });

        (status, Json(body)).into_response()
    }
}
