//! Authentication outcome value object.
//!
//! Protocol outcomes are values, not exceptions: every expected
//! authentication failure is folded into this result at the service
//! boundary. Only infrastructure faults travel as errors.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of an authentication operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
    /// Authentication succeeded; carries the signed access token
    Granted {
        /// JWT access token for API authentication
        token: String,
    },

    /// Authentication was rejected for protocol reasons
    Denied {
        /// Reasons for the rejection
        errors: Vec<String>,
    },
}

impl AuthenticationResult {
    /// Creates a successful result carrying an access token
    pub fn granted(token: impl Into<String>) -> Self {
        Self::Granted {
            token: token.into(),
        }
    }

    /// Creates a failed result with a list of errors
    pub fn denied(errors: Vec<String>) -> Self {
        Self::Denied { errors }
    }

    /// Creates a failed result with a single error
    pub fn denied_with(error: impl Into<String>) -> Self {
        Self::Denied {
            errors: vec![error.into()],
        }
    }

    /// Whether authentication succeeded
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// The access token, when granted
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Granted { token } => Some(token),
            Self::Denied { .. } => None,
        }
    }

    /// The rejection reasons; empty when granted
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Granted { .. } => &[],
            Self::Denied { errors } => errors,
        }
    }
}

// Wire shape: { "success": bool, "token": string? , "errors": [string]? }
impl Serialize for AuthenticationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Granted { token } => {
                let mut state = serializer.serialize_struct("AuthenticationResult", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("token", token)?;
                state.end()
            }
            Self::Denied { errors } => {
                let mut state = serializer.serialize_struct("AuthenticationResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_result() {
        let result = AuthenticationResult::granted("a.b.c");

        assert!(result.is_granted());
        assert_eq!(result.token(), Some("a.b.c"));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_denied_result() {
        let result = AuthenticationResult::denied_with("Invalid token");

        assert!(!result.is_granted());
        assert_eq!(result.token(), None);
        assert_eq!(result.errors(), ["Invalid token".to_string()]);
    }

    #[test]
    fn test_granted_serialization_shape() {
        let json = serde_json::to_value(AuthenticationResult::granted("a.b.c")).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["token"], "a.b.c");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_denied_serialization_shape() {
        let json =
            serde_json::to_value(AuthenticationResult::denied_with("User not found")).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0], "User not found");
        assert!(json.get("token").is_none());
    }
}
