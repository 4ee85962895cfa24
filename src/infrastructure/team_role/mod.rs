//! Team role infrastructure implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryTeamRoleRepository;
pub use postgres_repository::PostgresTeamRoleRepository;
