use std::net::SocketAddr;
use std::str::FromStr;

use env_helpers::get_env_default;
use secrecy::SecretString;

use super::InfraError;
use crate::application::jwt::TokenConfig;

/// Where renewal records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenewalBackend {
    #[default]
    Postgres,
    Redis,
}

impl RenewalBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalBackend::Postgres => "postgres",
            RenewalBackend::Redis => "redis",
        }
    }
}

impl FromStr for RenewalBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(RenewalBackend::Postgres),
            "redis" => Ok(RenewalBackend::Redis),
            other => Err(format!("expected 'postgres' or 'redis', got '{other}'")),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub renewal_backend: RenewalBackend,
    pub redis_url: String,
    /// Secrets, issuer and audience. Read-only after startup.
    pub token: TokenConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let access_secret = SecretString::new(required("ACCESS_TOKEN_SECRET")?.into());
        let renewal_secret = SecretString::new(required("RENEWAL_TOKEN_SECRET")?.into());
        let issuer = required("JWT_ISSUER")?;
        let audience = required("JWT_AUDIENCE")?;
        let leeway_secs: u64 = get_env_default("JWT_LEEWAY_SECS", 0);

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let database_url = required("DATABASE_URL")?;
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let renewal_backend = RenewalBackend::from_str(&get_env_default(
            "RENEWAL_BACKEND",
            RenewalBackend::default().as_str().to_string(),
        ))
        .map_err(|reason| InfraError::ConfigInvalid {
            var: "RENEWAL_BACKEND",
            reason,
        })?;
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            renewal_backend,
            redis_url,
            token: TokenConfig {
                access_secret,
                renewal_secret,
                issuer,
                audience,
                leeway_secs,
            },
        })
    }
}

/// Required and non-empty; there is no default to fall back to.
fn required(var: &'static str) -> Result<String, InfraError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InfraError::ConfigMissing { var }),
    }
}
