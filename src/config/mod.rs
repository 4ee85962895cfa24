//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, BlacklistBackend, BlacklistSettings, DatabaseConfig, LogFormat,
    LoggingConfig, ServerConfig,
};
