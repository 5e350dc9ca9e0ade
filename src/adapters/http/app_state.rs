use std::sync::Arc;

use axum::extract::FromRef;

use crate::use_cases::session::SessionIssuer;

#[derive(Clone)]
pub struct AppState {
    pub session_issuer: Arc<SessionIssuer>,
}

impl FromRef<AppState> for Arc<SessionIssuer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_issuer.clone()
    }
}
