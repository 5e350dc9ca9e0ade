//! Shared types and verification primitives for authgate tokens.
//!
//! This crate provides:
//! - JWT claims structure (`TokenClaims`)
//! - API response types for the session endpoints
//! - Error codes returned by the API
//! - `verify_jwt`, for resource servers that check access tokens locally

mod claims;
mod crypto;
mod errors;
mod responses;

pub use claims::TokenClaims;
pub use crypto::{TokenExpectations, verify_jwt};
pub use errors::{ErrorCode, JwtError};
pub use responses::{ErrorResponse, ProfileResponse, SessionResponse};
