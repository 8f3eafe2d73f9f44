//! Repository interfaces for persistence collaborators.
//!
//! Concrete implementations live in the infrastructure layer (refresh
//! token store) or outside this repository entirely (identity provider).

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
