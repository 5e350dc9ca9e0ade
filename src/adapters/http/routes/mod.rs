pub mod auth;

use axum::{Router, routing::get};

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}
