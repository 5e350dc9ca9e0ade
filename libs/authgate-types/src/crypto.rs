use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};

use crate::{JwtError, TokenClaims};

/// Issuer/audience a token must carry to be accepted.
#[derive(Debug, Clone)]
pub struct TokenExpectations {
    pub issuer: String,
    pub audience: String,
    /// Tolerance for clock skew in seconds
    pub leeway_secs: u64,
}

/// Verifies an HS256 token and returns its claims.
///
/// # Arguments
/// * `token` - The compact JWS string (header.payload.signature)
/// * `secret` - The class-specific HMAC secret the token was signed with
/// * `expected` - Issuer, audience and clock skew tolerance
///
/// # Returns
/// The verified `TokenClaims` or a `JwtError` describing the first failed check.
pub fn verify_jwt(
    token: &str,
    secret: &[u8],
    expected: &TokenExpectations,
) -> Result<TokenClaims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = expected.leeway_secs;
    validation.set_issuer(&[expected.issuer.as_str()]);
    validation.set_audience(&[expected.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::InvalidIssuer => JwtError::InvalidClaims("iss".into()),
            ErrorKind::InvalidAudience => JwtError::InvalidClaims("aud".into()),
            ErrorKind::MissingRequiredClaim(claim) => JwtError::InvalidClaims(claim.clone()),
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => JwtError::InvalidFormat(e.to_string()),
            _ => JwtError::Library(e),
        })
}
