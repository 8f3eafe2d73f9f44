//! Main token service implementation

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;

use fl_shared::config::auth::MIN_JWT_SECRET_BYTES;

use crate::domain::entities::token::{Claims, IssuedTokens, RefreshToken};
use crate::domain::value_objects::identity::Identity;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenConfig;

/// Length in bytes of the random opaque refresh token value
const OPAQUE_TOKEN_BYTES: usize = 64;

/// Service for issuing, validating, and rotating JWT tokens
///
/// The algorithm is pinned to HS256: both `Validation` instances reject
/// tokens whose header names anything else, closing the classic JWT
/// algorithm-downgrade attack.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Expiry-exempt validation used exclusively by the refresh flow
    refresh_validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token store
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error when the signing secret is too
    /// short for HS256 keys
    pub fn new(repository: R, config: TokenConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(DomainError::Token(TokenError::WeakSecret));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        let mut refresh_validation = validation.clone();
        refresh_validation.validate_exp = false;

        Ok(Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
            refresh_validation,
        })
    }

    /// Issues a new access token and companion refresh grant
    ///
    /// Builds the claim set from the identity, signs it, generates a
    /// high-entropy opaque refresh value, and persists the refresh record
    /// bound to the access token's `jti`. The pair is only returned once
    /// the record has been persisted; a store failure fails the whole
    /// issuance. Existing records are never consulted.
    ///
    /// # Arguments
    ///
    /// * `identity` - The authenticated identity to mint tokens for
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - The signed access token and saved record
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn issue_tokens(&self, identity: &Identity) -> Result<IssuedTokens, DomainError> {
        let claims = Claims::new_access_token(
            identity,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry_minutes,
        );
        let access_token = self.encode_jwt(&claims)?;

        let record = RefreshToken::with_expiry_days(
            identity.user_id,
            generate_opaque_value(),
            claims.jti.clone(),
            self.config.refresh_token_expiry_days,
        );
        let refresh_token = self.repository.save_refresh_token(record).await?;

        tracing::debug!(
            user_id = %identity.user_id,
            jti = %claims.jti,
            event = "tokens_issued",
            "Issued access token and refresh grant"
        );

        Ok(IssuedTokens {
            access_token,
            refresh_token,
        })
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token with expiry enforced
    ///
    /// Standard-path validation for consumers presenting a live token.
    /// Every failure collapses to a single invalid-token error so
    /// cryptographic failure reasons do not leak.
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT access token to verify
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid and unexpired
    /// * `Err(DomainError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        Ok(token_data.claims)
    }

    /// Validates a possibly-expired access token and recovers its claims
    ///
    /// Verifies signature, issuer, audience, and that the header names
    /// exactly HS256, while deliberately not enforcing expiry: this is
    /// the refresh-flow entry point and its inputs are expected to be
    /// expired already. Consumers wanting expiry enforcement use
    /// `verify_access_token` or check `Claims::is_expired` themselves.
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT access token, typically past its expiry
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The reconstructed claims, `jti` included
    /// * `Err(DomainError)` - Any structural or cryptographic failure
    pub fn decode_expired_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.refresh_validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        Ok(token_data.claims)
    }

    /// Redeems the refresh grant bound to an access token and mints a
    /// replacement pair
    ///
    /// Looks up the most recent non-invalidated record for the
    /// (user, jti) pair, rejects missing or expired grants, then issues a
    /// brand-new pair and invalidates the consumed record. Rotation is
    /// single-use: once redeemed, the same grant can never back another
    /// refresh.
    ///
    /// # Arguments
    ///
    /// * `identity` - The identity of the grant's owner, freshly loaded
    /// * `jwt_id` - The `jti` claim of the presented access token
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - The replacement pair
    /// * `Err(DomainError)` - No active grant, grant expired, or store failure
    pub async fn redeem_refresh_grant(
        &self,
        identity: &Identity,
        jwt_id: &str,
    ) -> Result<IssuedTokens, DomainError> {
        let record = self
            .repository
            .find_active_by_jwt_id(identity.user_id, jwt_id)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenNotFound))?;

        if record.is_expired() {
            tracing::warn!(
                user_id = %identity.user_id,
                jti = %jwt_id,
                event = "refresh_rejected",
                reason = "grant_expired",
                "Refresh grant past its expiry"
            );
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        let issued = self.issue_tokens(identity).await?;

        // Single-use rotation: retire the consumed grant only after the
        // replacement record is durable
        self.repository.invalidate(&record.token).await?;

        tracing::debug!(
            user_id = %identity.user_id,
            consumed_jti = %jwt_id,
            new_jti = %issued.refresh_token.jwt_id,
            event = "refresh_rotated",
            "Rotated refresh grant"
        );

        Ok(issued)
    }

    /// Revokes a specific refresh token by its opaque value
    ///
    /// Idempotent: revoking an already-invalidated token still succeeds.
    ///
    /// # Arguments
    ///
    /// * `token` - The opaque refresh token value
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Record found and invalidated
    /// * `Ok(false)` - No record with the given value
    /// * `Err(DomainError)` - Revocation failed
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        let revoked = self.repository.invalidate(token).await?;

        if revoked {
            tracing::warn!(event = "refresh_token_revoked", "Refresh token revoked");
        }

        Ok(revoked)
    }

    /// Invalidates every active refresh grant belonging to a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to sign out everywhere
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of grants newly invalidated
    /// * `Err(DomainError)` - Invalidation failed
    pub async fn revoke_all_for_user(&self, user_id: uuid::Uuid) -> Result<usize, DomainError> {
        let count = self.repository.invalidate_all_for_user(user_id).await?;

        tracing::warn!(
            user_id = %user_id,
            revoked = count,
            event = "user_tokens_revoked",
            "Invalidated all refresh grants for user"
        );

        Ok(count)
    }
}

/// Generates a cryptographically random opaque token value
fn generate_opaque_value() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE64.encode(bytes)
}
