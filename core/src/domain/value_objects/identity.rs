//! Authenticated identity reconstructed from a user record or a verified token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::TokenError;

/// A single typed claim about an identity
///
/// Claims form an ordered multiset: the same type may appear any number
/// of times and every occurrence is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. "group" or "plan"
    pub claim_type: String,

    /// Claim value
    pub value: String,
}

impl Claim {
    /// Creates a new claim
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Ephemeral authenticated identity
///
/// Built from a `User` at issuance time or reconstructed from verified
/// `Claims` during the refresh flow. Owned by the caller for the duration
/// of a request; never retained by this subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user's unique identifier
    pub user_id: Uuid,

    /// The user's email address
    pub email: String,

    /// Ordered multiset of provider claims
    pub claims: Vec<Claim>,

    /// Role names, in order
    pub roles: Vec<String>,
}

impl Identity {
    /// Creates an identity with no claims or roles
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            claims: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Builds the identity of a user record
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            claims: user.claims.clone(),
            roles: user.roles.clone(),
        }
    }

    /// Reconstructs an identity from verified token claims
    ///
    /// Fails with a missing-claim error when the subject is absent or not
    /// a UUID; the caller decides how that surfaces.
    pub fn from_claims(claims: &Claims) -> Result<Self, TokenError> {
        let user_id = claims.user_id().map_err(|_| TokenError::MissingClaim {
            claim: "sub".to_string(),
        })?;

        Ok(Self {
            user_id,
            email: claims.email.clone(),
            claims: claims.provider_claims(),
            roles: claims.role.clone(),
        })
    }
}
