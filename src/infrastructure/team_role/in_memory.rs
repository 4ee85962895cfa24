//! In-memory team role repository

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use tokio::sync::RwLock;

use crate::domain::team_role::{TeamRole, TeamRoleRepository, TeamRoleUpsert};
use crate::domain::DomainError;

/// In-memory implementation of TeamRoleRepository, keyed by uuid
#[derive(Debug, Default)]
pub struct InMemoryTeamRoleRepository {
    roles: Arc<RwLock<HashMap<String, TeamRole>>>,
    next_id: AtomicI64,
}

impl InMemoryTeamRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn upsert_one(&self, fields: TeamRoleUpsert) -> Result<TeamRole, DomainError> {
        let mut roles = self.roles.write().await;

        let role = match roles.get_mut(&fields.uuid) {
            Some(existing) => {
                existing.apply(fields);
                existing.clone()
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let role = TeamRole::new(id, fields, Utc::now());
                roles.insert(role.uuid().to_string(), role.clone());
                role
            }
        };

        Ok(role)
    }
}

#[async_trait]
impl TeamRoleRepository for InMemoryTeamRoleRepository {
    async fn get_all(&self) -> Result<Vec<TeamRole>, DomainError> {
        let roles = self.roles.read().await;
        let mut result: Vec<TeamRole> = roles.values().cloned().collect();
        result.sort_by_key(|r| r.id());
        Ok(result)
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<Option<TeamRole>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.get(uuid).cloned())
    }

    async fn upsert_many(&self, roles: Vec<TeamRoleUpsert>) -> Result<Vec<TeamRole>, DomainError> {
        for role in &roles {
            role.validate()
                .map_err(|e| DomainError::validation(format!("Team role '{}': {}", role.uuid, e)))?;
        }

        try_join_all(roles.into_iter().map(|role| self.upsert_one(role))).await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn role(uuid: &str, name: &str) -> TeamRoleUpsert {
        TeamRoleUpsert::new(uuid, name.to_uppercase(), name)
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(InMemoryTeamRoleRepository::new().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_then_read() {
        let repo = InMemoryTeamRoleRepository::new();

        let stored = repo
            .upsert_many(vec![role("r-1", "nurse"), role("r-2", "doctor")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id() < all[1].id());

        let found = repo.get_by_uuid("r-2").await.unwrap().unwrap();
        assert_eq!(found.name(), "doctor");

        assert!(repo.get_by_uuid("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields() {
        let repo = InMemoryTeamRoleRepository::new();
        let first = repo.upsert_many(vec![role("r-1", "nurse")]).await.unwrap();

        let updated = repo
            .upsert_many(vec![role("r-1", "head-nurse")
                .with_identifier("HN")
                .with_members(json!([{"uuid": "m-1"}]))])
            .await
            .unwrap();

        assert_eq!(updated[0].id(), first[0].id());
        assert_eq!(updated[0].created_at(), first[0].created_at());
        assert_eq!(updated[0].name(), "head-nurse");
        assert_eq!(updated[0].identifier(), Some("HN"));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_uuid_in_batch_yields_single_record() {
        let repo = InMemoryTeamRoleRepository::new();

        repo.upsert_many(vec![role("r-1", "first"), role("r-1", "second")])
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(["first", "second"].contains(&all[0].name()));
    }

    #[tokio::test]
    async fn test_invalid_record_fails_whole_batch() {
        let repo = InMemoryTeamRoleRepository::new();

        let result = repo
            .upsert_many(vec![role("r-1", "nurse"), TeamRoleUpsert::new("", "X", "x")])
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let repo = InMemoryTeamRoleRepository::new();
        assert!(repo.upsert_many(Vec::new()).await.unwrap().is_empty());
    }
}
