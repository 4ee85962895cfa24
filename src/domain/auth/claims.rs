//! Identity carried inside access and refresh tokens

use std::fmt;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Subject identifier as it appears in the token
///
/// Tokens minted by the login flow may carry a JSON number; the original
/// JSON type is kept so re-issued tokens carry the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SubjectId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Who a token speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: SubjectId,
    pub email: String,
    pub role: String,
}

impl Identity {
    pub fn new(id: impl Into<SubjectId>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Decoded token payload
///
/// Lives for one request; it is attached to the request context by the
/// authenticator and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: SubjectId,
    pub email: String,
    pub role: String,
    /// Issued at (Unix epoch seconds)
    #[serde(default)]
    pub iat: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

impl IdentityClaims {
    /// Create claims for an identity that expire `ttl` from now
    pub fn new(identity: &Identity, ttl: Duration) -> Result<Self, DomainError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::internal("Token lifetime out of range"))?;

        Ok(Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        })
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.id.clone(), &self.email, &self.role)
    }

    /// String form of the subject, as used in blacklist keys
    pub fn user_id(&self) -> String {
        self.id.to_string()
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Lifetime encoded in the token, in seconds
    pub fn lifetime_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity() -> Identity {
        Identity::new("user-1", "jane@example.org", "admin")
    }

    #[test]
    fn test_claims_from_identity() {
        let claims = IdentityClaims::new(&identity(), Duration::minutes(15)).unwrap();

        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.email, "jane@example.org");
        assert_eq!(claims.role(), "admin");
        assert_eq!(claims.lifetime_secs(), 15 * 60);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_claims_round_trip_identity() {
        let claims = IdentityClaims::new(&identity(), Duration::minutes(1)).unwrap();
        assert_eq!(claims.identity(), identity());
    }

    #[test]
    fn test_numeric_id_keeps_its_type() {
        let claims: IdentityClaims = serde_json::from_str(
            r#"{"id": 42, "email": "a@b.c", "role": "user", "exp": 1700000000}"#,
        )
        .unwrap();

        assert_eq!(claims.id, SubjectId::from(42i64));
        assert_eq!(claims.user_id(), "42");
        assert_eq!(claims.iat, 0);

        let reissued = IdentityClaims::new(&claims.identity(), Duration::minutes(1)).unwrap();
        assert_eq!(serde_json::to_value(&reissued).unwrap()["id"], json!(42));
    }

    #[test]
    fn test_string_id_stays_string() {
        let claims: IdentityClaims = serde_json::from_str(
            r#"{"id": "42", "email": "a@b.c", "role": "user", "exp": 1700000000}"#,
        )
        .unwrap();

        assert_eq!(claims.id, SubjectId::from("42"));
        assert_eq!(serde_json::to_value(&claims).unwrap()["id"], json!("42"));
    }

    #[test]
    fn test_lifetime_overflow_is_an_error() {
        let result = IdentityClaims::new(&identity(), Duration::MAX);
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
