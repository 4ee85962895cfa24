//! Token revocation lookups

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read side of the token blacklist
///
/// Entries are written by other parts of the platform (logout, account
/// lockout); this service only asks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Whether this exact token string has been revoked
    async fn is_token_blacklisted(&self, token: &str) -> Result<bool, DomainError>;

    /// Whether every token issued to this user has been revoked
    async fn is_all_tokens_blacklisted(&self, user_id: &str) -> Result<bool, DomainError>;
}
