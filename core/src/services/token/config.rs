//! Configuration for the token service

use fl_shared::config::auth::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
///
/// Immutable after construction. The defaults keep the required lifetime
/// disparity: refresh grants outlive access tokens by orders of magnitude.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HS256 signing secret
    pub jwt_secret: String,
    /// Issuer claim, checked for exact match on validation
    pub issuer: String,
    /// Audience claim, checked for exact match on validation
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_minutes: config.access_token_expiry / 60,
            refresh_token_expiry_days: config.refresh_token_expiry / 86400,
        }
    }
}
