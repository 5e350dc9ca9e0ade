use std::sync::Arc;

use authgate_types::{JwtError, TokenClaims, TokenExpectations, verify_jwt};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::{identity::Identity, token_class::TokenClass};

/// Signing material, loaded once at startup.
pub struct TokenConfig {
    pub access_secret: SecretString,
    pub renewal_secret: SecretString,
    pub issuer: String,
    pub audience: String,
    /// Clock skew tolerated when verifying `exp`
    pub leeway_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    pub token: String,
    /// Unix timestamp
    pub expires_at: i64,
}

#[derive(Clone)]
pub struct TokenSigner {
    config: Arc<TokenConfig>,
}

impl TokenSigner {
    pub fn new(config: Arc<TokenConfig>) -> Self {
        Self { config }
    }

    /// Fails if either secret, the issuer or the audience is empty.
    pub fn ensure_configured(&self) -> AppResult<()> {
        self.secret(TokenClass::Access)?;
        self.secret(TokenClass::Renewal)?;
        if self.config.issuer.trim().is_empty() {
            return Err(AppError::Configuration("token issuer is not configured".into()));
        }
        if self.config.audience.trim().is_empty() {
            return Err(AppError::Configuration(
                "token audience is not configured".into(),
            ));
        }
        Ok(())
    }

    fn secret(&self, class: TokenClass) -> AppResult<&[u8]> {
        let secret = match class {
            TokenClass::Access => &self.config.access_secret,
            TokenClass::Renewal => &self.config.renewal_secret,
        };
        let bytes = secret.expose_secret().as_bytes();
        if bytes.is_empty() {
            return Err(AppError::Configuration(format!(
                "{class} token secret is not configured"
            )));
        }
        Ok(bytes)
    }

    pub fn sign(
        &self,
        identity: &Identity,
        class: TokenClass,
        now: OffsetDateTime,
    ) -> AppResult<SignedToken> {
        let secret = self.secret(class)?;
        let iat = now.unix_timestamp();
        let exp = iat + class.ttl().whole_seconds();
        let claims = TokenClaims {
            sub: identity.username().to_string(),
            roles: identity.role_claims(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &EncodingKey::from_secret(secret))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(SignedToken {
            token,
            expires_at: exp,
        })
    }

    /// Checks signature, issuer, audience and expiry against the class secret.
    ///
    /// Any rejection maps to the client error matching the class, so callers
    /// never learn which check failed.
    pub fn verify(&self, token: &str, class: TokenClass) -> AppResult<TokenClaims> {
        let secret = self.secret(class)?;
        let expected = TokenExpectations {
            issuer: self.config.issuer.clone(),
            audience: self.config.audience.clone(),
            leeway_secs: self.config.leeway_secs,
        };
        verify_jwt(token, secret, &expected).map_err(|e: JwtError| {
            tracing::debug!(error = %e, class = %class, "token rejected");
            match class {
                TokenClass::Access => AppError::InvalidCredentials,
                TokenClass::Renewal => AppError::InvalidRenewalToken,
            }
        })
    }
}
