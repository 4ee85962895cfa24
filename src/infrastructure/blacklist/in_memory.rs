//! In-memory token blacklist

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::TokenBlacklist;
use crate::domain::DomainError;

/// In-memory blacklist for local development and tests
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenBlacklist {
    tokens: Arc<RwLock<HashSet<String>>>,
    users: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryTokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke a single token
    pub async fn blacklist_token(&self, token: impl Into<String>) {
        self.tokens.write().await.insert(token.into());
    }

    /// Revoke every token issued to a user
    pub async fn blacklist_all_for_user(&self, user_id: impl Into<String>) {
        self.users.write().await.insert(user_id.into());
    }
}

#[async_trait]
impl TokenBlacklist for InMemoryTokenBlacklist {
    async fn is_token_blacklisted(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.tokens.read().await.contains(token))
    }

    async fn is_all_tokens_blacklisted(&self, user_id: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(user_id))
    }
}
