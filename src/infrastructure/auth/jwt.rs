//! JWT signing and verification for access and refresh tokens

use std::fmt::Debug;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::domain::auth::{Identity, IdentityClaims};
use crate::domain::DomainError;

/// Access tokens are short-lived unless configured otherwise
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Why a token failed verification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(err.to_string()),
        }
    }
}

/// Configuration for the JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric key for access tokens
    pub access_secret: String,
    /// Symmetric key for refresh tokens
    pub refresh_secret: String,
    /// Lifetime of newly issued access tokens
    pub access_ttl: Duration,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"[hidden]")
            .field("refresh_secret", &"[hidden]")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }
}

/// Token operations used by the authenticator and refresh handler
pub trait TokenService: Send + Sync + Debug {
    /// Mint an access token for an identity
    fn issue_access(&self, identity: &Identity) -> Result<String, DomainError>;

    /// Mint a refresh token; issuing these belongs to the login flow, this
    /// exists for tooling and tests
    fn issue_refresh(&self, identity: &Identity, ttl: Duration) -> Result<String, DomainError>;

    fn verify_access(&self, token: &str) -> Result<IdentityClaims, TokenError>;

    fn verify_refresh(&self, token: &str) -> Result<IdentityClaims, TokenError>;
}

/// HS256 implementation with separate access and refresh keys
#[derive(Clone)]
pub struct JwtService {
    access_ttl: Duration,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl", &self.access_ttl)
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access_ttl: config.access_ttl,
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    fn sign(&self, claims: &IdentityClaims, key: &EncodingKey) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|e| DomainError::internal(format!("Failed to sign JWT: {}", e)))
    }

    fn verify(&self, token: &str, key: &DecodingKey) -> Result<IdentityClaims, TokenError> {
        let data = decode::<IdentityClaims>(token, key, &self.validation)?;

        // jsonwebtoken only rejects once now > exp; exp == now is already expired
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl TokenService for JwtService {
    fn issue_access(&self, identity: &Identity) -> Result<String, DomainError> {
        let claims = IdentityClaims::new(identity, self.access_ttl)?;
        self.sign(&claims, &self.access_encoding)
    }

    fn issue_refresh(&self, identity: &Identity, ttl: Duration) -> Result<String, DomainError> {
        let claims = IdentityClaims::new(identity, ttl)?;
        self.sign(&claims, &self.refresh_encoding)
    }

    fn verify_access(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.verify(token, &self.access_decoding)
    }

    fn verify_refresh(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.verify(token, &self.refresh_decoding)
    }
}
