//! Domain-specific error types for authentication and token operations
//!
//! Protocol-level failures are mapped into `AuthenticationResult` at the
//! service boundary; these enums carry the internal taxonomy. Conversions
//! to `ErrorResponse` provide the API-facing envelope.

use fl_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature, structural, algorithm, issuer, or audience mismatch.
    /// Deliberately coarse so cryptographic failure reasons do not leak.
    #[error("Invalid token")]
    InvalidToken,

    /// Validation succeeded but a required claim is absent or malformed
    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },

    /// No matching non-invalidated refresh record for the (user, jti) pair
    #[error("No valid refresh token found")]
    RefreshTokenNotFound,

    /// Matching refresh record found but past its expiry
    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    /// Signing secret shorter than the HS256 minimum
    #[error("Signing secret is too weak")]
    WeakSecret,
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::MissingClaim { .. } => "MISSING_CLAIM",
            TokenError::RefreshTokenNotFound => "REFRESH_TOKEN_NOT_FOUND",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::WeakSecret => "WEAK_SECRET",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
