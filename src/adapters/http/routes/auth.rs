use std::sync::Arc;

use authgate_types::{ProfileResponse, SessionResponse};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    use_cases::session::SessionIssuer,
};

#[derive(Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenewParams {
    refresh_token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/renew", get(renew))
        .route("/me", get(me))
}

async fn login(
    State(issuer): State<Arc<SessionIssuer>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> AppResult<Json<SessionResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let session = issuer.login(&payload.username, &payload.password).await?;
    Ok(Json(session.into()))
}

async fn renew(
    State(issuer): State<Arc<SessionIssuer>>,
    Query(params): Query<RenewParams>,
) -> AppResult<Json<SessionResponse>> {
    let token = params
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or(AppError::InvalidRenewalToken)?;
    let session = issuer.renew(&token).await?;
    Ok(Json(session.into()))
}

async fn me(
    State(issuer): State<Arc<SessionIssuer>>,
    headers: HeaderMap,
) -> AppResult<Json<ProfileResponse>> {
    let token = bearer_token(&headers).ok_or(AppError::InvalidCredentials)?;
    let claims = issuer.authenticate(token)?;
    Ok(Json(ProfileResponse {
        username: claims.sub,
        roles: claims.roles,
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
