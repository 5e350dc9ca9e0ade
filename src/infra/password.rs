use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier as _, password_hash::SaltString,
};
use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::credentials::PasswordVerifier,
};

/// Compared against when the user does not exist. Uses the default Argon2id
/// parameters so the comparison costs the same as a real one.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$YXV0aGdhdGUtZHVtbXkhIQ$BwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSY";

/// Argon2id verifier for PHC-formatted hashes.
///
/// Hashing is CPU-bound, so comparisons run on the blocking pool.
#[derive(Clone, Default)]
pub struct Argon2PasswordVerifier;

#[async_trait]
impl PasswordVerifier for Argon2PasswordVerifier {
    async fn verify(&self, password: &str, password_hash: Option<&str>) -> AppResult<bool> {
        let password = password.to_owned();
        let stored = password_hash.map(str::to_owned);
        tokio::task::spawn_blocking(move || verify_blocking(&password, stored.as_deref()))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
    }
}

fn verify_blocking(password: &str, stored: Option<&str>) -> bool {
    let parsed = match PasswordHash::new(stored.unwrap_or(DUMMY_HASH)) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    let matches = Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok();
    matches && stored.is_some()
}

/// Produce an Argon2id PHC string for seeding the `users` table.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| AppError::Internal(format!("salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}
