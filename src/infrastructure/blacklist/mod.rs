//! Token blacklist implementations and runtime selection

mod in_memory;
mod redis;

use std::sync::Arc;

use crate::config::{BlacklistBackend, BlacklistSettings};
use crate::domain::auth::TokenBlacklist;
use crate::domain::DomainError;

pub use in_memory::InMemoryTokenBlacklist;
pub use redis::{RedisBlacklistConfig, RedisTokenBlacklist, DEFAULT_KEY_PREFIX};

/// Build the blacklist selected by configuration
pub async fn create_blacklist(
    settings: &BlacklistSettings,
) -> Result<Arc<dyn TokenBlacklist>, DomainError> {
    match settings.backend {
        BlacklistBackend::Memory => Ok(Arc::new(InMemoryTokenBlacklist::new())),
        BlacklistBackend::Redis => {
            let url = settings.redis_url.clone().ok_or_else(|| {
                DomainError::configuration("blacklist.redis_url is required for the redis backend")
            })?;

            let config = RedisBlacklistConfig::new(url).with_key_prefix(&settings.key_prefix);
            Ok(Arc::new(RedisTokenBlacklist::new(config).await?))
        }
    }
}
