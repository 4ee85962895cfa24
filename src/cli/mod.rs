//! CLI module for the Team Sync API
//!
//! - `serve`: run the HTTP server
//! - `migrate`: apply (or revert) the database schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Team Sync API - token authentication and team role synchronization
#[derive(Parser)]
#[command(name = "teamsync-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending schema migrations to the configured database
    Migrate(migrate::MigrateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["teamsync-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["teamsync-api", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => assert!(args.revert),
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["teamsync-api"]).is_err());
    }
}
