//! Identity provider trait for user lookup and credential verification.
//!
//! The user/credential store is an external collaborator: this subsystem
//! consumes it through this interface only. Password hashing and storage
//! are the provider's concern; credentials pass through opaquely.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for the external identity provider
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Provider error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    ///
    /// # Arguments
    /// * `email` - The sign-in email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError)` - Provider error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user with the given credentials
    ///
    /// # Arguments
    /// * `user` - The user entity to persist
    /// * `password` - Opaque credential, hashed by the provider
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Duplicate email or provider error
    async fn create(&self, user: User, password: &str) -> Result<User, DomainError>;

    /// Verify credentials and return the matching user
    ///
    /// # Arguments
    /// * `email` - The sign-in email
    /// * `password` - Opaque credential to verify
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Credentials valid
    /// * `Ok(None)` - Unknown email or wrong password
    /// * `Err(DomainError)` - Provider error occurred
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Assign a role to a user
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    /// * `role` - Role name, treated as an opaque string
    ///
    /// # Returns
    /// * `Ok(())` - Role assigned
    /// * `Err(DomainError)` - Unknown user or provider error
    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), DomainError>;
}
