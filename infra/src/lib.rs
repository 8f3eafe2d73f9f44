//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the FundLink
//! backend. It provides the concrete MySQL-backed refresh token store
//! consumed by the core token lifecycle.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx, with connection
//!   pool management and the `refresh_tokens` migration.
//!
//! The identity provider is an external collaborator and has no
//! implementation here; the core consumes it through its trait.

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlTokenRepository};
