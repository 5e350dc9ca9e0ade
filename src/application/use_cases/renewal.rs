use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::use_cases::credentials::UserRepo;
use crate::domain::entities::{
    identity::Identity,
    renewal_record::{RenewalRecord, hash_token},
};

#[async_trait]
pub trait RenewalTokenRepo: Send + Sync {
    /// Store a record. Earlier live records of the same user stop being live.
    async fn insert(&self, record: &RenewalRecord) -> AppResult<()>;

    /// Atomically invalidate a live record and return its owner.
    ///
    /// Returns `None` when the digest is unknown, expired at `now`, or was
    /// already invalidated. Of two concurrent calls for one digest at most
    /// one gets `Some`.
    async fn take_live(&self, token_hash: &str, now: OffsetDateTime) -> AppResult<Option<Uuid>>;
}

#[derive(Clone)]
pub struct RenewalStore {
    tokens: Arc<dyn RenewalTokenRepo>,
    users: Arc<dyn UserRepo>,
}

impl RenewalStore {
    pub fn new(tokens: Arc<dyn RenewalTokenRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { tokens, users }
    }

    #[instrument(skip(self, token))]
    pub async fn put(
        &self,
        token: &str,
        user_id: Uuid,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> AppResult<()> {
        let record = RenewalRecord::new(token, user_id, issued_at, expires_at);
        self.tokens.insert(&record).await
    }

    /// Invalidate `token` and load its owner's current identity.
    ///
    /// Roles come from the user store as of now, not from issuance time.
    #[instrument(skip(self, token))]
    pub async fn consume(&self, token: &str, now: OffsetDateTime) -> AppResult<Identity> {
        let token_hash = hash_token(token);
        let user_id = self
            .tokens
            .take_live(&token_hash, now)
            .await?
            .ok_or(AppError::InvalidRenewalToken)?;

        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!(%user_id, "renewal token owner no longer exists");
            AppError::InvalidRenewalToken
        })?;

        Ok(user.to_identity())
    }
}
