//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken record persistence
///
/// This trait defines the contract for the refresh token store. One
/// record is appended per issuance and mutated only by flipping its
/// `invalidated` flag; records are never physically deleted here.
///
/// # Consistency
/// Implementations must offer read-your-writes consistency: a lookup
/// must observe any record whose save completed before the lookup began.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// Issuance is not complete until this call returns; a failure here
    /// fails the whole issuance.
    ///
    /// # Arguments
    /// * `token` - The RefreshToken record to persist
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError)` - Save failed
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token record by its opaque value
    ///
    /// # Arguments
    /// * `token` - The opaque token value to search for
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Record found
    /// * `Ok(None)` - No record with the given value
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find the most recently created non-invalidated record for a
    /// (user, access-token jti) pair
    ///
    /// Expired records are still returned; expiry is the caller's check,
    /// so "no valid token" and "token expired" remain distinct outcomes.
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    /// * `jwt_id` - The `jti` of the access token issued alongside
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Most recent matching record
    /// * `Ok(None)` - No non-invalidated record for the pair
    /// * `Err(DomainError)` - Store error occurred
    async fn find_active_by_jwt_id(
        &self,
        user_id: Uuid,
        jwt_id: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Invalidate the record with the given opaque value
    ///
    /// The flag is monotonic; invalidating an already-invalidated record
    /// succeeds.
    ///
    /// # Arguments
    /// * `token` - The opaque token value to invalidate
    ///
    /// # Returns
    /// * `Ok(true)` - A record with the value exists and is now invalidated
    /// * `Ok(false)` - No record with the given value
    /// * `Err(DomainError)` - Invalidation failed
    async fn invalidate(&self, token: &str) -> Result<bool, DomainError>;

    /// Invalidate every non-invalidated record belonging to a user
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records newly invalidated
    /// * `Err(DomainError)` - Invalidation failed
    async fn invalidate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
