//! User entity representing a registered FundLink account.
//!
//! This is the identity-provider view of an account: the fields the
//! token lifecycle needs. Credentials never appear on the entity;
//! verification happens behind the `UserRepository` trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::identity::Claim;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address used as the sign-in name
    pub email: String,

    /// Role names assigned to the user, in assignment order
    pub roles: Vec<String>,

    /// Provider claims attached to the account, in attachment order
    pub claims: Vec<Claim>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            roles: Vec::new(),
            claims: Vec::new(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Adds a role to the user
    pub fn add_role(&mut self, role: impl Into<String>) {
        self.roles.push(role.into());
        self.updated_at = Utc::now();
    }

    /// Attaches a provider claim to the user
    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
        self.updated_at = Utc::now();
    }

    /// Records a successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
