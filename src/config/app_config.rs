use serde::Deserialize;

use crate::domain::DomainError;

/// Longest access token lifetime the service will mint
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 24 * 60;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub blacklist: BlacklistSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing and role gate settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_token_ttl_minutes: i64,
    /// Roles allowed through the admin gate
    pub admin_roles: Vec<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"[hidden]")
            .field("refresh_secret", &"[hidden]")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("admin_roles", &self.admin_roles)
            .finish()
    }
}

/// Database settings; no url means the in-memory repository
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlacklistSettings {
    pub backend: BlacklistBackend,
    pub redis_url: Option<String>,
    pub key_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_token_ttl_minutes: 15,
            admin_roles: vec!["admin".to_string()],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl Default for BlacklistSettings {
    fn default() -> Self {
        Self {
            backend: BlacklistBackend::Memory,
            redis_url: None,
            key_prefix: "blacklist".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from config files, `APP__*` variables and the JWT secret variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.admin_roles")
                    .try_parsing(true),
            )
            .set_override_option("auth.access_secret", std::env::var("JWT_ACCESS_SECRET").ok())?
            .set_override_option("auth.refresh_secret", std::env::var("JWT_REFRESH_SECRET").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the service cannot start with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.auth.access_secret.is_empty() {
            return Err(DomainError::configuration("JWT_ACCESS_SECRET is not set"));
        }

        if self.auth.refresh_secret.is_empty() {
            return Err(DomainError::configuration("JWT_REFRESH_SECRET is not set"));
        }

        if self.auth.access_token_ttl_minutes <= 0 {
            return Err(DomainError::configuration(
                "auth.access_token_ttl_minutes must be positive",
            ));
        }

        if self.auth.access_token_ttl_minutes > MAX_ACCESS_TOKEN_TTL_MINUTES {
            return Err(DomainError::configuration(format!(
                "auth.access_token_ttl_minutes cannot exceed {}",
                MAX_ACCESS_TOKEN_TTL_MINUTES
            )));
        }

        if self.auth.admin_roles.is_empty() {
            return Err(DomainError::configuration("auth.admin_roles cannot be empty"));
        }

        if self.blacklist.backend == BlacklistBackend::Redis && self.blacklist.redis_url.is_none() {
            return Err(DomainError::configuration(
                "blacklist.redis_url is required for the redis backend",
            ));
        }

        Ok(())
    }
}
