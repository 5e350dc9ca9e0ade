use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted renewal token.
///
/// Only the digest of the token string is kept; the signed token itself is
/// already unguessable, so hashing it yields an unguessable lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalRecord {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl RenewalRecord {
    pub fn new(
        token: &str,
        user_id: Uuid,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        Self {
            token_hash: hash_token(token),
            user_id,
            created_at,
            expires_at,
        }
    }

    pub fn is_live_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at > now
    }
}

pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
