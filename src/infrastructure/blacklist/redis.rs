//! Redis-backed token blacklist
//!
//! A blacklist entry is any existing key; values and TTLs are owned by
//! whoever writes the entries.

use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::auth::TokenBlacklist;
use crate::domain::DomainError;

pub const DEFAULT_KEY_PREFIX: &str = "blacklist";

/// Configuration for the Redis blacklist
#[derive(Debug, Clone)]
pub struct RedisBlacklistConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Namespace for blacklist keys
    pub key_prefix: String,
}

impl RedisBlacklistConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

/// Redis blacklist lookups over a shared connection manager
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    connection: ConnectionManager,
    key_prefix: String,
}

impl fmt::Debug for RedisTokenBlacklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisTokenBlacklist")
            .field("key_prefix", &self.key_prefix)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisTokenBlacklist {
    pub async fn new(config: RedisBlacklistConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::blacklist(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::blacklist(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self {
            connection,
            key_prefix: config.key_prefix,
        })
    }

    async fn exists(&self, key: String) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        conn.exists(&key)
            .await
            .map_err(|e| DomainError::blacklist(format!("Failed to query blacklist: {}", e)))
    }
}

fn token_key(prefix: &str, token: &str) -> String {
    format!("{}:token:{}", prefix, token)
}

fn user_key(prefix: &str, user_id: &str) -> String {
    format!("{}:user:{}", prefix, user_id)
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    async fn is_token_blacklisted(&self, token: &str) -> Result<bool, DomainError> {
        self.exists(token_key(&self.key_prefix, token)).await
    }

    async fn is_all_tokens_blacklisted(&self, user_id: &str) -> Result<bool, DomainError> {
        self.exists(user_key(&self.key_prefix, user_id)).await
    }
}
