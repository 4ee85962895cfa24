//! Team role entity and the upsert input shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{
    validate_labels, validate_members, validate_team_role_uuid, TeamRoleValidationError,
};

/// Team role as received from the upstream source of truth
///
/// Everything except `uuid` is overwritten when the role already exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoleUpsert {
    pub uuid: String,
    #[serde(default)]
    pub identifier: Option<String>,
    pub display: String,
    pub name: String,
    #[serde(default = "empty_members")]
    pub members: Value,
    #[serde(default)]
    pub creator: Option<Value>,
}

fn empty_members() -> Value {
    Value::Array(Vec::new())
}

impl TeamRoleUpsert {
    pub fn new(uuid: impl Into<String>, display: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            identifier: None,
            display: display.into(),
            name: name.into(),
            members: empty_members(),
            creator: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_members(mut self, members: Value) -> Self {
        self.members = members;
        self
    }

    pub fn with_creator(mut self, creator: Value) -> Self {
        self.creator = Some(creator);
        self
    }

    pub fn validate(&self) -> Result<(), TeamRoleValidationError> {
        validate_team_role_uuid(&self.uuid)?;
        validate_labels(&self.display, &self.name)?;
        validate_members(&self.members)
    }
}

/// Stored team role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRole {
    id: i64,
    uuid: String,
    identifier: Option<String>,
    display: String,
    name: String,
    members: Value,
    creator: Option<Value>,
    created_at: DateTime<Utc>,
}

impl TeamRole {
    /// Build a stored role from its store-assigned id, fields and creation time
    pub fn new(id: i64, fields: TeamRoleUpsert, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            uuid: fields.uuid,
            identifier: fields.identifier,
            display: fields.display,
            name: fields.name,
            members: fields.members,
            creator: fields.creator,
            created_at,
        }
    }

    /// Overwrite the mutable fields; `id`, `uuid` and `created_at` are kept
    pub fn apply(&mut self, fields: TeamRoleUpsert) {
        self.identifier = fields.identifier;
        self.display = fields.display;
        self.name = fields.name;
        self.members = fields.members;
        self.creator = fields.creator;
    }

    // Getters

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &Value {
        &self.members
    }

    pub fn creator(&self) -> Option<&Value> {
        self.creator.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
