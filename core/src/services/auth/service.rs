//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::auth_result::AuthenticationResult;
use crate::domain::value_objects::identity::Identity;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

/// Authentication service orchestrating the token lifecycle
///
/// Stateless per request: all durable state lives behind the injected
/// repositories. Protocol failures are folded into
/// `AuthenticationResult::Denied` at this boundary; only infrastructure
/// faults travel out as `Err`.
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Identity provider for user lookup and credential verification
    user_repository: Arc<U>,
    /// Token service for issuance, validation, and rotation
    token_service: Arc<TokenService<T>>,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Identity provider
    /// * `token_service` - Token service for JWT management
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<T>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Register a new account
    ///
    /// Delegates to the identity provider. Registration does not
    /// auto-login: no tokens are issued here.
    ///
    /// # Arguments
    ///
    /// * `email` - Sign-in email for the new account
    /// * `password` - Opaque credential, hashed by the provider
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created account
    /// * `Err(DomainError)` - Duplicate email or provider failure
    pub async fn sign_up(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self.user_repository.create(User::new(email), password).await?;

        tracing::debug!(
            user_id = %user.id,
            event = "user_registered",
            "Registered new account"
        );

        Ok(user)
    }

    /// Sign in with email and password
    ///
    /// On success, issues an access/refresh pair and returns the access
    /// token; the refresh value stays server-side, bound to the access
    /// token's `jti`.
    ///
    /// # Arguments
    ///
    /// * `email` - Sign-in email
    /// * `password` - Opaque credential
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticationResult)` - Granted with the access token, or
    ///   denied on bad credentials
    /// * `Err(DomainError)` - Provider or store failure
    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthenticationResult> {
        let user = match self
            .user_repository
            .verify_credentials(email, password)
            .await?
        {
            Some(user) => user,
            None => {
                tracing::warn!(event = "sign_in_rejected", "Credential verification failed");
                return deny(AuthError::InvalidCredentials.into());
            }
        };

        let identity = Identity::from_user(&user);
        let issued = self.token_service.issue_tokens(&identity).await?;

        Ok(AuthenticationResult::granted(issued.access_token))
    }

    /// Refresh an access token using the previously issued, now-expired
    /// access token string
    ///
    /// Strictly sequential: validate the token (expiry exempt), check
    /// the required claims, resolve the subject, then redeem the stored
    /// refresh grant. Each rejection maps to a distinct denial.
    ///
    /// # Arguments
    ///
    /// * `expired_access_token` - The access token presented for refresh
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticationResult)` - Granted with a fresh access token,
    ///   or denied with the protocol-level reason
    /// * `Err(DomainError)` - Provider or store failure
    pub async fn refresh(&self, expired_access_token: &str) -> DomainResult<AuthenticationResult> {
        // Step 1: verify signature, issuer, audience, and algorithm;
        // expiry is deliberately not enforced on this path
        let claims = match self.token_service.decode_expired_token(expired_access_token) {
            Ok(claims) => claims,
            Err(err) => return deny(err),
        };

        // Step 2: the refresh flow needs the subject and the token binding
        if claims.jti.is_empty() {
            return deny(TokenError::MissingClaim {
                claim: "jti".to_string(),
            }
            .into());
        }
        let user_id = match claims.user_id() {
            Ok(id) => id,
            Err(_) => {
                return deny(TokenError::MissingClaim {
                    claim: "sub".to_string(),
                }
                .into())
            }
        };

        // Step 3: the subject must still resolve to a live account
        let user = match self.user_repository.find_by_id(user_id).await? {
            Some(user) => user,
            None => {
                tracing::warn!(
                    user_id = %user_id,
                    event = "refresh_rejected",
                    reason = "unknown_user",
                    "Refresh for unresolvable subject"
                );
                return deny(AuthError::UserNotFound.into());
            }
        };

        // Steps 4-6: redeem the stored grant and mint a replacement pair
        // from the user's current identity
        let identity = Identity::from_user(&user);
        match self
            .token_service
            .redeem_refresh_grant(&identity, &claims.jti)
            .await
        {
            Ok(issued) => Ok(AuthenticationResult::granted(issued.access_token)),
            Err(err) => deny(err),
        }
    }

    /// Revoke a refresh token by its opaque value
    ///
    /// Idempotent; a missing record reports `false` without error.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The opaque refresh token value
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether a record with the value exists
    /// * `Err(DomainError)` - Store failure
    pub async fn revoke(&self, refresh_token: &str) -> DomainResult<bool> {
        self.token_service.revoke_refresh_token(refresh_token).await
    }

    /// Sign a user out everywhere by invalidating all their refresh grants
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to sign out
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of grants invalidated
    /// * `Err(DomainError)` - Store failure
    pub async fn sign_out(&self, user_id: Uuid) -> DomainResult<usize> {
        self.token_service.revoke_all_for_user(user_id).await
    }
}

/// Fold a protocol-level failure into a denied result; let
/// infrastructure faults propagate untouched.
fn deny(err: DomainError) -> DomainResult<AuthenticationResult> {
    match denial_message(&err) {
        Some(message) => Ok(AuthenticationResult::denied_with(message)),
        None => Err(err),
    }
}

/// The caller-visible vocabulary for expected authentication failures.
/// Anything unmapped is an infrastructure fault.
fn denial_message(err: &DomainError) -> Option<String> {
    match err {
        DomainError::Token(TokenError::InvalidToken)
        | DomainError::Token(TokenError::RefreshTokenNotFound)
        | DomainError::Token(TokenError::RefreshTokenExpired) => Some(err.to_string()),
        DomainError::Token(TokenError::MissingClaim { .. }) => {
            Some("Invalid token claims".to_string())
        }
        DomainError::Auth(AuthError::UserNotFound)
        | DomainError::Auth(AuthError::InvalidCredentials) => Some(err.to_string()),
        _ => None,
    }
}
