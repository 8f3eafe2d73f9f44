//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Keeps records in insertion order so "most recently created" is
/// well-defined without comparing timestamps. Clones share storage,
/// letting tests inspect records behind a service.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<Vec<RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of every stored record, for assertions
    pub async fn records(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.clone()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Opaque values are unique by construction
        if tokens.iter().any(|t| t.token == token.token) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        tokens.push(token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }

    async fn find_active_by_jwt_id(
        &self,
        user_id: Uuid,
        jwt_id: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .rev()
            .find(|t| t.user_id == user_id && t.jwt_id == jwt_id && !t.invalidated)
            .cloned())
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        if let Some(record) = tokens.iter_mut().find(|t| t.token == token) {
            record.invalidate();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn invalidate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.iter_mut() {
            if token.user_id == user_id && !token.invalidated {
                token.invalidate();
                count += 1;
            }
        }

        Ok(count)
    }
}
