//! Migrate command - applies or reverts the schema

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresMigrator};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let pg_config = crate::postgres_config(&config)
        .ok_or_else(|| anyhow::anyhow!("database.url is not configured"))?;
    let pool = connect_pool(&pg_config).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        migrator.run().await?;
        info!(version = ?migrator.version().await?, "Schema up to date");
    }

    Ok(())
}
