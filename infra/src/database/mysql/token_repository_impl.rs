//! MySQL implementation of the TokenRepository trait.
//!
//! Concrete persistence for refresh token records using SQLx. One row is
//! appended per issuance; rows are only ever mutated by flipping the
//! monotonic `invalidated` flag, never deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fl_core::domain::entities::token::RefreshToken;
use fl_core::errors::DomainError;
use fl_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken record
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token: row.try_get("token").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token: {}", e),
            })?,
            jwt_id: row.try_get("jwt_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get jwt_id: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            invalidated: row
                .try_get("invalidated")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get invalidated: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token, jwt_id, created_at, expires_at, invalidated
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token)
            .bind(&token.jwt_id)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.invalidated)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save refresh token: {}", e),
            })?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, jwt_id, created_at, expires_at, invalidated
            FROM refresh_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_active_by_jwt_id(
        &self,
        user_id: Uuid,
        jwt_id: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        // Expired rows are still returned; expiry is the caller's check
        let query = r#"
            SELECT id, user_id, token, jwt_id, created_at, expires_at, invalidated
            FROM refresh_tokens
            WHERE user_id = ? AND jwt_id = ? AND invalidated = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(jwt_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh token by jwt id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET invalidated = TRUE WHERE token = ? AND invalidated = FALSE",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to invalidate refresh token: {}", e),
        })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Already-invalidated rows still report success; only a missing
        // row is false
        let exists_row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM refresh_tokens WHERE token = ?) AS present",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to check refresh token existence: {}", e),
        })?;

        let present: i8 = exists_row
            .try_get("present")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get existence result: {}", e),
            })?;

        Ok(present == 1)
    }

    async fn invalidate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET invalidated = TRUE WHERE user_id = ? AND invalidated = FALSE",
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to invalidate user tokens: {}", e),
        })?;

        Ok(result.rows_affected() as usize)
    }
}
