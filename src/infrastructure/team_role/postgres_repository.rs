//! PostgreSQL team role repository implementation

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::domain::team_role::{TeamRole, TeamRoleRepository, TeamRoleUpsert};
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRoleRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRoleRepository {
    pool: PgPool,
}

impl PostgresTeamRoleRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_one(&self, role: TeamRoleUpsert) -> Result<TeamRole, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO team_role (uuid, identifier, display, name, members, creator)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (uuid) DO UPDATE
            SET identifier = EXCLUDED.identifier,
                display = EXCLUDED.display,
                name = EXCLUDED.name,
                members = EXCLUDED.members,
                creator = EXCLUDED.creator
            RETURNING id, uuid, identifier, display, name, members, creator, created_at
            "#,
        )
        .bind(&role.uuid)
        .bind(&role.identifier)
        .bind(&role.display)
        .bind(&role.name)
        .bind(&role.members)
        .bind(&role.creator)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to upsert team role '{}': {}", role.uuid, e))
        })?;

        row_to_team_role(&row)
    }
}

#[async_trait]
impl TeamRoleRepository for PostgresTeamRoleRepository {
    async fn get_all(&self) -> Result<Vec<TeamRole>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, uuid, identifier, display, name, members, creator, created_at
            FROM team_role
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list team roles: {}", e)))?;

        rows.iter().map(row_to_team_role).collect()
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<TeamRole>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, uuid, identifier, display, name, members, creator, created_at
            FROM team_role
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team role: {}", e)))?;

        row.as_ref().map(row_to_team_role).transpose()
    }

    async fn upsert_many(&self, roles: Vec<TeamRoleUpsert>) -> Result<Vec<TeamRole>, DomainError> {
        for role in &roles {
            role.validate()
                .map_err(|e| DomainError::validation(format!("Team role '{}': {}", role.uuid, e)))?;
        }

        let count = roles.len();
        let stored = try_join_all(roles.into_iter().map(|role| self.upsert_one(role))).await?;
        info!(count, "Upserted team roles");

        Ok(stored)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Health check failed: {}", e)))?;

        Ok(())
    }
}

fn row_to_team_role(row: &sqlx::postgres::PgRow) -> Result<TeamRole, DomainError> {
    let column = |e: sqlx::Error| DomainError::storage(format!("Invalid team role row: {}", e));

    let id: i64 = row.try_get("id").map_err(column)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(column)?;
    let members: Value = row.try_get("members").map_err(column)?;

    let fields = TeamRoleUpsert {
        uuid: row.try_get("uuid").map_err(column)?,
        identifier: row.try_get("identifier").map_err(column)?,
        display: row.try_get("display").map_err(column)?,
        name: row.try_get("name").map_err(column)?,
        members,
        creator: row.try_get("creator").map_err(column)?,
    };

    Ok(TeamRole::new(id, fields, created_at))
}
