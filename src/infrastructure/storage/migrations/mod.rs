//! Database migrations

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// Applies and reverts the schema
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Applies every pending migration
    async fn run(&self) -> Result<(), DomainError>;

    /// Reverts the most recently applied migration, returning its version
    async fn revert(&self) -> Result<Option<i64>, DomainError>;

    /// Latest applied version
    async fn version(&self) -> Result<Option<i64>, DomainError>;
}

/// A single versioned schema change
///
/// `up` and `down` each hold exactly one statement; they run as prepared
/// queries inside the recording transaction.
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL applied on upgrade
    pub up: String,
    /// SQL applied on revert
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Schema migrations, in application order
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create team_role table",
            r#"
            CREATE TABLE IF NOT EXISTS team_role (
                id BIGSERIAL PRIMARY KEY,
                uuid VARCHAR(255) NOT NULL UNIQUE,
                identifier VARCHAR(255),
                display TEXT NOT NULL,
                name TEXT NOT NULL,
                members JSONB NOT NULL DEFAULT '[]'::jsonb,
                creator JSONB,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
            "DROP TABLE IF EXISTS team_role;",
        ),
        Migration::new(
            2,
            "Index team_role by creation time",
            "CREATE INDEX IF NOT EXISTS idx_team_role_created_at ON team_role(created_at);",
            "DROP INDEX IF EXISTS idx_team_role_created_at;",
        ),
    ]
}

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
    migrations: Vec<Migration>,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            migrations: schema_migrations(),
        }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Apply one migration and record it in the same transaction
    async fn apply(&self, migration: &Migration) -> Result<(), DomainError> {
        let storage = |e: sqlx::Error| {
            DomainError::storage(format!("Migration {} failed: {}", migration.version, e))
        };

        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query(migration.up.as_str())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        info!(version = migration.version, description = %migration.description, "Applied migration");
        Ok(())
    }
}

#[async_trait]
impl Migrator for PostgresMigrator {
    async fn run(&self) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        for migration in &self.migrations {
            if !self.is_applied(migration.version).await? {
                self.apply(migration).await?;
            }
        }

        Ok(())
    }

    async fn revert(&self) -> Result<Option<i64>, DomainError> {
        let Some(version) = self.version().await? else {
            return Ok(None);
        };

        let migration = self
            .migrations
            .iter()
            .find(|m| m.version == version)
            .ok_or_else(|| {
                DomainError::storage(format!("Applied migration {} is unknown", version))
            })?;

        let storage =
            |e: sqlx::Error| DomainError::storage(format!("Revert of {} failed: {}", version, e));

        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query(migration.down.as_str())
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(version)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        info!(version, "Reverted migration");
        Ok(Some(version))
    }

    async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_ascend() {
        let migrations = schema_migrations();

        assert!(!migrations.is_empty());
        for pair in migrations.windows(2) {
            assert!(pair[1].version > pair[0].version);
        }
    }

    #[test]
    fn test_migrations_have_content() {
        for migration in schema_migrations() {
            assert!(!migration.description.is_empty());
            assert!(!migration.up.trim().is_empty());
            assert!(!migration.down.trim().is_empty());
        }
    }

    #[test]
    fn test_migrations_are_single_statements() {
        for migration in schema_migrations() {
            for sql in [&migration.up, &migration.down] {
                let body = sql.trim().trim_end_matches(';');
                assert!(!body.contains(';'), "migration {} has several statements", migration.version);
            }
        }
    }

    #[tokio::test]
    async fn test_migrator_futures_are_send() {
        fn assert_send<T: Send>(_: &T) {}

        async fn drive(migrator: &PostgresMigrator, migration: &Migration) {
            let _ = migrator.apply(migration).await;
            let _ = migrator.run().await;
            let _ = migrator.revert().await;
        }

        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/teamsync")
            .unwrap();
        let migrator = PostgresMigrator::new(pool);
        let migration = schema_migrations().remove(0);
        let future = drive(&migrator, &migration);

        assert_send(&future);
    }

    #[test]
    fn test_team_role_uuid_is_unique() {
        let create = &schema_migrations()[0].up;

        assert!(create.contains("team_role"));
        assert!(create.contains("uuid VARCHAR(255) NOT NULL UNIQUE"));
    }
}
