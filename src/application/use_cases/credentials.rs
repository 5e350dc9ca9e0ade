use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::{identity::Identity, user::UserRecord};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>>;
}

#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// Constant-time check of `password` against a stored hash.
    ///
    /// With `None` the implementation still performs a full comparison
    /// (against a dummy hash) and returns `false`, so an unknown user costs
    /// the same as a wrong password.
    async fn verify(&self, password: &str, password_hash: Option<&str>) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserRepo>,
    passwords: Arc<dyn PasswordVerifier>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserRepo>, passwords: Arc<dyn PasswordVerifier>) -> Self {
        Self { users, passwords }
    }

    /// Resolve a username/password pair into an identity.
    ///
    /// Unknown user and wrong password both yield `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<Identity> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let user = self.users.find_by_username(username).await?;
        let hash = user.as_ref().map(|u| u.password_hash.as_str());

        if !self.passwords.verify(password, hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        // verify() returns false for a missing hash, so the user is present here
        let user = user.ok_or(AppError::InvalidCredentials)?;
        Ok(user.to_identity())
    }
}
