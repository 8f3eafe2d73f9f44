//! Test fixtures for authentication service tests

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::token::mock::MockTokenRepository;
use crate::repositories::user::mock::MockUserRepository;
use crate::repositories::TokenRepository;
use crate::services::auth::AuthService;
use crate::services::token::{TokenConfig, TokenService};

pub const TEST_SECRET: &str = "auth-test-signing-secret-of-adequate-length";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn test_config() -> TokenConfig {
    TokenConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..TokenConfig::default()
    }
}

/// Fully wired auth service over shared in-memory repositories
pub struct AuthHarness {
    pub users: Arc<MockUserRepository>,
    pub token_repo: MockTokenRepository,
    pub tokens: Arc<TokenService<MockTokenRepository>>,
    pub service: AuthService<MockUserRepository, MockTokenRepository>,
}

impl AuthHarness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: TokenConfig) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let token_repo = MockTokenRepository::new();
        let tokens = Arc::new(
            TokenService::new(token_repo.clone(), config).expect("Failed to create token service"),
        );
        let service = AuthService::new(users.clone(), tokens.clone());

        Self {
            users,
            token_repo,
            tokens,
            service,
        }
    }

    /// Seed an account with the standard test password
    pub async fn seeded_user(&self, email: &str, roles: &[&str]) -> User {
        let mut user = User::new(email);
        for role in roles {
            user.add_role(*role);
        }
        self.users.insert(user.clone(), TEST_PASSWORD).await;
        user
    }
}

/// Token repository whose every operation fails, for asserting that
/// store faults propagate instead of becoming denials
pub struct FailingTokenRepository;

fn store_fault() -> DomainError {
    DomainError::Internal {
        message: "store unavailable".to_string(),
    }
}

#[async_trait]
impl TokenRepository for FailingTokenRepository {
    async fn save_refresh_token(&self, _token: RefreshToken) -> Result<RefreshToken, DomainError> {
        Err(store_fault())
    }

    async fn find_by_token(&self, _token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Err(store_fault())
    }

    async fn find_active_by_jwt_id(
        &self,
        _user_id: Uuid,
        _jwt_id: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        Err(store_fault())
    }

    async fn invalidate(&self, _token: &str) -> Result<bool, DomainError> {
        Err(store_fault())
    }

    async fn invalidate_all_for_user(&self, _user_id: Uuid) -> Result<usize, DomainError> {
        Err(store_fault())
    }
}
