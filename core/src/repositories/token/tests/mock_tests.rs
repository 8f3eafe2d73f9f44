//! Unit tests for the mock token repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::repositories::token::mock::MockTokenRepository;
use crate::repositories::token::r#trait::TokenRepository;

fn record(user_id: Uuid, token: &str, jwt_id: &str) -> RefreshToken {
    RefreshToken::new(user_id, token.to_string(), jwt_id.to_string())
}

#[tokio::test]
async fn test_save_and_find_by_token() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();

    let found = repo.find_by_token("value-1").await.unwrap().unwrap();
    assert_eq!(found.user_id, user_id);
    assert_eq!(found.jwt_id, "jti-1");

    assert!(repo.find_by_token("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_opaque_value_rejected() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();

    let result = repo
        .save_refresh_token(record(user_id, "value-1", "jti-2"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_find_active_by_jwt_id_returns_most_recent() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "older", "jti-1"))
        .await
        .unwrap();
    repo.save_refresh_token(record(user_id, "newer", "jti-1"))
        .await
        .unwrap();

    let found = repo
        .find_active_by_jwt_id(user_id, "jti-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.token, "newer");
}

#[tokio::test]
async fn test_find_active_by_jwt_id_skips_invalidated() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();
    repo.invalidate("value-1").await.unwrap();

    assert!(repo
        .find_active_by_jwt_id(user_id, "jti-1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_find_active_by_jwt_id_returns_expired_records() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    let mut expired = record(user_id, "value-1", "jti-1");
    expired.expires_at = Utc::now() - Duration::days(1);
    repo.save_refresh_token(expired).await.unwrap();

    // Expiry is the caller's check, not the store's
    let found = repo
        .find_active_by_jwt_id(user_id, "jti-1")
        .await
        .unwrap()
        .unwrap();
    assert!(found.is_expired());
}

#[tokio::test]
async fn test_find_active_by_jwt_id_scopes_to_user() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();

    assert!(repo
        .find_active_by_jwt_id(Uuid::new_v4(), "jti-1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_invalidate_is_idempotent() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();

    assert!(repo.invalidate("value-1").await.unwrap());
    assert!(repo.invalidate("value-1").await.unwrap());

    let found = repo.find_by_token("value-1").await.unwrap().unwrap();
    assert!(found.invalidated);
}

#[tokio::test]
async fn test_invalidate_missing_returns_false() {
    let repo = MockTokenRepository::new();
    assert!(!repo.invalidate("missing").await.unwrap());
}

#[tokio::test]
async fn test_invalidate_all_for_user() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    let other = Uuid::new_v4();

    repo.save_refresh_token(record(user_id, "value-1", "jti-1"))
        .await
        .unwrap();
    repo.save_refresh_token(record(user_id, "value-2", "jti-2"))
        .await
        .unwrap();
    repo.save_refresh_token(record(other, "value-3", "jti-3"))
        .await
        .unwrap();
    repo.invalidate("value-1").await.unwrap();

    // Only the still-active record counts
    let count = repo.invalidate_all_for_user(user_id).await.unwrap();
    assert_eq!(count, 1);

    let untouched = repo.find_by_token("value-3").await.unwrap().unwrap();
    assert!(!untouched.invalidated);
}
