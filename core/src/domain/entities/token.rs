//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::value_objects::identity::{Claim, Identity};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "fundlink";

/// JWT audience
pub const JWT_AUDIENCE: &str = "fundlink-api";

/// Claim type carrying role membership
pub const ROLE_CLAIM: &str = "role";

/// Registered claim names controlled by the issuer; provider claims with
/// these types are not merged into the payload (`role` is the exception).
const RESERVED_CLAIMS: &[&str] = &["sub", "iat", "exp", "iss", "aud", "jti", "email", "uid"];

/// Claims structure for the JWT payload
///
/// `sub`, `jti`, `email`, and `uid` deserialize with defaults so a
/// structurally valid token missing one of them still decodes; the
/// refresh flow then rejects it with a distinct missing-claims outcome
/// instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    #[serde(default)]
    pub jti: String,

    /// Email of the authenticated user
    #[serde(default)]
    pub email: String,

    /// Convenience duplicate of the subject
    #[serde(default)]
    pub uid: String,

    /// Role claims, one entry per role membership
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,

    /// Additional identity-provider claims. Repeated claim types collapse
    /// into a JSON array in encounter order so every value survives.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// Builds the claim set as the union of the registered claims, the
    /// identity's own claims, and one role claim per role name. Duplicate
    /// provider claim types are all kept.
    pub fn new_access_token(
        identity: &Identity,
        issuer: &str,
        audience: &str,
        expiry_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(expiry_minutes);
        let subject = identity.user_id.to_string();

        let mut role = Vec::new();
        let mut extra = Map::new();
        for claim in &identity.claims {
            if claim.claim_type == ROLE_CLAIM {
                role.push(claim.value.clone());
            } else if !RESERVED_CLAIMS.contains(&claim.claim_type.as_str()) {
                append_claim(&mut extra, &claim.claim_type, &claim.value);
            }
        }
        role.extend(identity.roles.iter().cloned());

        Self {
            sub: subject.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            email: identity.email.clone(),
            uid: subject,
            role,
            extra,
        }
    }

    /// Checks if the claims have expired
    ///
    /// The refresh-path validator ignores expiry by design; any consumer
    /// wanting enforcement checks it here.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the subject claim
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Reconstructs the provider claim multiset, exploding arrays back
    /// into repeated claims in stored order.
    pub fn provider_claims(&self) -> Vec<Claim> {
        let mut claims = Vec::new();
        for (claim_type, value) in &self.extra {
            match value {
                Value::Array(values) => {
                    for v in values {
                        claims.push(Claim::new(claim_type.clone(), value_to_string(v)));
                    }
                }
                other => claims.push(Claim::new(claim_type.clone(), value_to_string(other))),
            }
        }
        claims
    }
}

/// Merge a claim value into the flattened map, keeping every value for a
/// repeated claim type by collapsing them into an array.
fn append_claim(extra: &mut Map<String, Value>, claim_type: &str, value: &str) {
    match extra.get_mut(claim_type) {
        None => {
            extra.insert(claim_type.to_string(), Value::String(value.to_string()));
        }
        Some(Value::Array(values)) => {
            values.push(Value::String(value.to_string()));
        }
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, Value::String(value.to_string())]);
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Refresh token record persisted in the store
///
/// One record is appended per issuance, bound to the access token it was
/// issued alongside through `jwt_id`. Records are only ever mutated by
/// flipping `invalidated` to true; physical deletion is an external
/// administrative operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Opaque high-entropy token value, base64-encoded
    pub token: String,

    /// `jti` of the access token this record was issued alongside
    pub jwt_id: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been invalidated (monotonic false to true)
    pub invalidated: bool,
}

impl RefreshToken {
    /// Creates a new refresh token record expiring after the standard
    /// refresh lifetime
    pub fn new(user_id: Uuid, token: String, jwt_id: String) -> Self {
        Self::with_expiry_days(user_id, token, jwt_id, REFRESH_TOKEN_EXPIRY_DAYS)
    }

    /// Creates a new refresh token record with an explicit lifetime
    pub fn with_expiry_days(user_id: Uuid, token: String, jwt_id: String, days: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            jwt_id,
            created_at: now,
            expires_at: now + Duration::days(days),
            invalidated: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token can still back a refresh
    ///
    /// A token is active if it has not expired and has not been invalidated
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.invalidated
    }

    /// Invalidates the refresh token
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Result of a successful issuance: the signed access token string and
/// the refresh record persisted alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedTokens {
    /// Signed JWT access token
    pub access_token: String,

    /// Persisted refresh token record backing the next refresh
    pub refresh_token: RefreshToken,
}
