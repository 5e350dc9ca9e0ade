use serde::{Deserialize, Serialize};

use crate::ErrorCode;

/// Body returned by `POST /auth/login` and `GET /auth/renew`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Access token
    pub token: String,

    /// Renewal token, exchanged at `/auth/renew`
    pub refresh_token: String,

    /// Renewal token expiry (Unix timestamp)
    pub token_expired: i64,
}

/// Body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
    pub code: ErrorCode,
}

/// Body returned by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub roles: Vec<String>,
}
