//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access token issuance and verification
//! - Expiry-exempt validation for the refresh flow
//! - Refresh grant redemption with single-use rotation
//! - Refresh token revocation

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use service::TokenService;
