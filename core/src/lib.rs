//! # FundLink Core
//!
//! Core business logic and domain layer for the FundLink backend.
//! This crate contains the authentication token lifecycle: domain entities,
//! repository interfaces, token issuance/validation services, and the
//! error types that tie them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
