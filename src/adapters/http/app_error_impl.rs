use authgate_types::{ErrorCode, ErrorResponse};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::AppError;

const AUTH_FAILED: &str = "Authentication failed";
const SERVER_FAULT: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client mistakes are routine; server faults need attention.
        if self.is_client_error() {
            tracing::info!(error = %self, "Request rejected");
        } else {
            tracing::error!(error = ?self, "Request failed");
        }

        match self {
            AppError::InvalidCredentials | AppError::InvalidRenewalToken => {
                error_resp(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, AUTH_FAILED)
            }
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, &msg)
            }
            AppError::Configuration(_) | AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                error_resp(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    SERVER_FAULT,
                )
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = ErrorResponse {
        error_message: message.to_string(),
        code,
    };
    (status, Json(body)).into_response()
}
