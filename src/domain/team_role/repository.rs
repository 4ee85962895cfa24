//! Team role repository trait

use async_trait::async_trait;

use super::entity::{TeamRole, TeamRoleUpsert};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for team roles synchronized from the upstream directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRoleRepository: Send + Sync {
    /// All stored roles, ordered by id
    async fn get_all(&self) -> Result<Vec<TeamRole>, DomainError>;

    /// Find a role by its external uuid
    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<TeamRole>, DomainError>;

    /// Insert or overwrite each role keyed by uuid
    ///
    /// Upserts are issued concurrently. The first failure fails the whole
    /// call. When a batch holds the same uuid twice, one stored record
    /// results and which input it reflects is unspecified.
    async fn upsert_many(&self, roles: Vec<TeamRoleUpsert>) -> Result<Vec<TeamRole>, DomainError>;

    /// Cheap reachability check for readiness
    async fn health_check(&self) -> Result<(), DomainError>;
}
