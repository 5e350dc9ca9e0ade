//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use secrecy::SecretString;
use uuid::Uuid;

use crate::{
    application::jwt::TokenConfig, domain::entities::user::UserRecord,
    test_utils::PlainPasswordVerifier,
};

/// Create a test user whose password verifies under `PlainPasswordVerifier`.
pub fn create_test_user(
    username: &str,
    password: &str,
    overrides: impl FnOnce(&mut UserRecord),
) -> UserRecord {
    let mut user = UserRecord {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: PlainPasswordVerifier::hash(password),
        roles: vec!["user".to_string()],
    };
    overrides(&mut user);
    user
}

/// Token configuration with distinct non-empty secrets per class.
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: SecretString::new("test-access-secret-0123456789".into()),
        renewal_secret: SecretString::new("test-renewal-secret-9876543210".into()),
        issuer: "authgate-test".to_string(),
        audience: "authgate-test-clients".to_string(),
        leeway_secs: 0,
    }
}
