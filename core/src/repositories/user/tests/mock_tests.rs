//! Unit tests for the mock user repository

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::mock::MockUserRepository;
use crate::repositories::user::r#trait::UserRepository;

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockUserRepository::new();
    let user = repo
        .create(User::new("casey@fundlink.app"), "hunter2!secret")
        .await
        .unwrap();

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "casey@fundlink.app");

    let by_email = repo
        .find_by_email("casey@fundlink.app")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(User::new("casey@fundlink.app"), "pw-one")
        .await
        .unwrap();

    let err = repo
        .create(User::new("casey@fundlink.app"), "pw-two")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::UserAlreadyExists)
    ));
}

#[tokio::test]
async fn test_verify_credentials() {
    let repo = MockUserRepository::new();
    repo.create(User::new("casey@fundlink.app"), "hunter2!secret")
        .await
        .unwrap();

    assert!(repo
        .verify_credentials("casey@fundlink.app", "hunter2!secret")
        .await
        .unwrap()
        .is_some());
    assert!(repo
        .verify_credentials("casey@fundlink.app", "wrong")
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .verify_credentials("nobody@fundlink.app", "hunter2!secret")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_assign_role() {
    let repo = MockUserRepository::new();
    let user = repo
        .create(User::new("casey@fundlink.app"), "pw")
        .await
        .unwrap();

    repo.assign_role(user.id, "admin").await.unwrap();

    let updated = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(updated.roles, vec!["admin".to_string()]);

    let err = repo.assign_role(Uuid::new_v4(), "admin").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}
