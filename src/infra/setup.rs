use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::TokenSigner,
        use_cases::{
            credentials::{CredentialVerifier, UserRepo},
            renewal::{RenewalStore, RenewalTokenRepo},
            session::SessionIssuer,
        },
    },
    infra::{
        InfraError,
        config::{AppConfig, RenewalBackend},
        password::Argon2PasswordVerifier,
        postgres_persistence,
        renewal_tokens::RedisRenewalTokenStore,
    },
};

/// Wire the session issuer to its stores.
///
/// Refuses to start with an incomplete signing configuration, so a missing
/// secret surfaces here rather than on the first login.
pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let signer = TokenSigner::new(Arc::new(config.token));
    signer.ensure_configured().map_err(InfraError::Signer)?;

    let postgres_arc =
        Arc::new(postgres_persistence(&config.database_url, config.db_max_connections).await?);

    let renewal_repo: Arc<dyn RenewalTokenRepo> = match config.renewal_backend {
        RenewalBackend::Postgres => postgres_arc.clone(),
        RenewalBackend::Redis => Arc::new(RedisRenewalTokenStore::new(&config.redis_url).await?),
    };
    tracing::info!(backend = config.renewal_backend.as_str(), "renewal store ready");

    let users = postgres_arc as Arc<dyn UserRepo>;
    let session_issuer = SessionIssuer::new(
        CredentialVerifier::new(users.clone(), Arc::new(Argon2PasswordVerifier)),
        signer,
        RenewalStore::new(renewal_repo, users),
    );

    Ok(AppState {
        session_issuer: Arc::new(session_issuer),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "authgate=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped if the file can't be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
