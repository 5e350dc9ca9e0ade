use serde::{Deserialize, Serialize};

/// Claims carried by both access and renewal tokens.
///
/// The two token classes share this exact shape; they differ only in the
/// signing secret and in `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username of the authenticated user
    pub sub: String,

    /// Role names in deterministic (sorted) order, one entry per role
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Token expiration (Unix timestamp)
    pub exp: i64,

    /// Token issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token id (UUID v4)
    pub jti: String,
}

impl TokenClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
