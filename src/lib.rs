//! Team Sync API
//!
//! Bearer-token authentication, role gating and access-token refresh in
//! front of a team role store kept in sync with an upstream directory:
//! - JWT access/refresh tokens (HS256) with a token and user blacklist
//! - Explicit request pipelines composed per route group
//! - PostgreSQL or in-memory team role storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{DomainError, TeamRoleRepository};
use infrastructure::{
    auth::{JwtConfig, JwtService},
    blacklist::create_blacklist,
    storage::{connect_pool, PostgresConfig},
    team_role::{InMemoryTeamRoleRepository, PostgresTeamRoleRepository},
};
use tracing::info;

/// Build the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let access_ttl = chrono::Duration::try_minutes(config.auth.access_token_ttl_minutes)
        .ok_or_else(|| DomainError::configuration("auth.access_token_ttl_minutes is out of range"))?;
    let jwt_config = JwtConfig::new(&config.auth.access_secret, &config.auth.refresh_secret)
        .with_access_ttl(access_ttl);
    let tokens = Arc::new(JwtService::new(jwt_config));

    let blacklist = create_blacklist(&config.blacklist).await?;
    info!(backend = ?config.blacklist.backend, "Token blacklist ready");

    let team_roles = create_team_role_repository(config).await?;

    Ok(AppState::new(
        tokens,
        blacklist,
        team_roles,
        config.auth.admin_roles.clone(),
    ))
}

/// PostgreSQL when a database url is configured, in-memory otherwise
async fn create_team_role_repository(
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn TeamRoleRepository>> {
    match postgres_config(config) {
        Some(pg_config) => {
            info!("Using PostgreSQL storage for team roles");
            let pool = connect_pool(&pg_config).await?;
            Ok(Arc::new(PostgresTeamRoleRepository::new(pool)))
        }
        None => {
            info!("Using in-memory storage for team roles");
            Ok(Arc::new(InMemoryTeamRoleRepository::new()))
        }
    }
}

/// Pool settings from the `database` section, if a url is set
pub fn postgres_config(config: &AppConfig) -> Option<PostgresConfig> {
    let database = &config.database;

    database.url.as_ref().map(|url| {
        PostgresConfig::new(url)
            .with_max_connections(database.max_connections)
            .with_min_connections(database.min_connections)
            .with_connect_timeout(database.connect_timeout_secs)
    })
}
