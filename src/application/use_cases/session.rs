use authgate_types::{SessionResponse, TokenClaims};
use time::OffsetDateTime;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::jwt::TokenSigner;
use crate::application::use_cases::{credentials::CredentialVerifier, renewal::RenewalStore};
use crate::domain::entities::{identity::Identity, token_class::TokenClass};

/// Tokens handed back on a successful login or renewal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub access_token: String,
    pub renewal_token: String,
    /// Renewal token expiry (Unix timestamp)
    pub renewal_expires_at: i64,
}

impl From<SessionResult> for SessionResponse {
    fn from(session: SessionResult) -> Self {
        SessionResponse {
            token: session.access_token,
            refresh_token: session.renewal_token,
            token_expired: session.renewal_expires_at,
        }
    }
}

#[derive(Clone)]
pub struct SessionIssuer {
    credentials: CredentialVerifier,
    signer: TokenSigner,
    renewals: RenewalStore,
}

impl SessionIssuer {
    pub fn new(credentials: CredentialVerifier, signer: TokenSigner, renewals: RenewalStore) -> Self {
        Self {
            credentials,
            signer,
            renewals,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<SessionResult> {
        let identity = self.credentials.verify(username, password).await?;
        self.issue(&identity, OffsetDateTime::now_utc()).await
    }

    /// Exchange a renewal token for a fresh session.
    ///
    /// The presented token is invalidated before the replacement is minted,
    /// so it can be used at most once even if issuance later fails.
    #[instrument(skip(self, renewal_token))]
    pub async fn renew(&self, renewal_token: &str) -> AppResult<SessionResult> {
        self.signer.verify(renewal_token, TokenClass::Renewal)?;
        let now = OffsetDateTime::now_utc();
        let identity = self.renewals.consume(renewal_token, now).await?;
        self.issue(&identity, now).await
    }

    /// Claims of a valid access token. Renewal tokens are rejected.
    pub fn authenticate(&self, access_token: &str) -> AppResult<TokenClaims> {
        self.signer.verify(access_token, TokenClass::Access)
    }

    async fn issue(&self, identity: &Identity, now: OffsetDateTime) -> AppResult<SessionResult> {
        let access = self.signer.sign(identity, TokenClass::Access, now)?;
        let renewal = self.signer.sign(identity, TokenClass::Renewal, now)?;

        let expires_at = OffsetDateTime::from_unix_timestamp(renewal.expires_at)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if let Err(e) = self
            .renewals
            .put(&renewal.token, identity.user_id(), now, expires_at)
            .await
        {
            tracing::error!(error = %e, user_id = %identity.user_id(), "renewal token not persisted, discarding session");
            return Err(e);
        }

        tracing::info!(user_id = %identity.user_id(), "session issued");
        Ok(SessionResult {
            access_token: access.token,
            renewal_token: renewal.token,
            renewal_expires_at: renewal.expires_at,
        })
    }
}
