//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, (User, String)>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a user directly, bypassing the create checks
    pub async fn insert(&self, user: User, password: &str) {
        let mut users = self.users.write().await;
        users.insert(user.id, (user, password.to_string()));
    }

    /// Remove a user, simulating account deletion after issuance
    pub async fn remove(&self, user_id: Uuid) {
        let mut users = self.users.write().await;
        users.remove(&user_id);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn create(&self, user: User, password: &str) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, (user.clone(), password.to_string()));
        Ok(user)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|(user, stored)| user.email == email && stored == password)
            .map(|(user, _)| user.clone()))
    }

    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user_id) {
            Some((user, _)) => {
                user.add_role(role);
                Ok(())
            }
            None => Err(DomainError::Auth(AuthError::UserNotFound)),
        }
    }
}
