//! Authentication and authorization failures

use thiserror::Error;

use crate::domain::DomainError;

/// Which kind of token a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Terminal authentication/authorization outcomes
///
/// Every variant except `Internal` is a client-visible 4xx.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication failed. No token provided.")]
    MissingToken,

    #[error("Authentication failed. Invalid token.")]
    InvalidToken,

    #[error("Access token expired. Please refresh your token.")]
    ExpiredToken,

    #[error("{}", blacklisted_message(.0))]
    Blacklisted(TokenKind),

    #[error("Access denied. Insufficient permissions.")]
    Forbidden,

    #[error("No refresh token provided.")]
    MissingRefreshToken,

    #[error("Invalid or expired refresh token.")]
    InvalidRefreshToken,

    #[error("Authentication service unavailable.")]
    Internal(#[source] DomainError),
}

fn blacklisted_message(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => "Authentication failed. Token is blacklisted.",
        TokenKind::Refresh => "Refresh token is blacklisted.",
    }
}

impl AuthError {
    /// HTTP status the failure maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::ExpiredToken
            | Self::Blacklisted(_)
            | Self::InvalidRefreshToken => 401,
            Self::Forbidden => 403,
            Self::MissingRefreshToken => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::Blacklisted(_) => "blacklisted",
            Self::Forbidden => "forbidden",
            Self::MissingRefreshToken => "missing_refresh_token",
            Self::InvalidRefreshToken => "invalid_refresh_token",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        Self::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::MissingToken.to_string(),
            "Authentication failed. No token provided."
        );
        assert_eq!(
            AuthError::ExpiredToken.to_string(),
            "Access token expired. Please refresh your token."
        );
        assert_eq!(
            AuthError::Blacklisted(TokenKind::Access).to_string(),
            "Authentication failed. Token is blacklisted."
        );
        assert_eq!(
            AuthError::Blacklisted(TokenKind::Refresh).to_string(),
            "Refresh token is blacklisted."
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::ExpiredToken.status_code(), 401);
        assert_eq!(AuthError::Blacklisted(TokenKind::Access).status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::MissingRefreshToken.status_code(), 400);
        assert_eq!(AuthError::InvalidRefreshToken.status_code(), 401);
        assert_eq!(
            AuthError::from(DomainError::blacklist("down")).status_code(),
            500
        );
    }
}
