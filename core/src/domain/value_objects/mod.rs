//! Value objects representing immutable domain concepts.

pub mod auth_result;
pub mod identity;

// Re-export commonly used types
pub use auth_result::AuthenticationResult;
pub use identity::{Claim, Identity};
