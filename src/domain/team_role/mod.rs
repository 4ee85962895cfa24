//! Team role domain module
//!
//! Team roles are mirrored from an external directory by sync jobs and read
//! by the admin API.

mod entity;
mod repository;
mod validation;

pub use entity::{TeamRole, TeamRoleUpsert};
#[cfg(test)]
pub use repository::MockTeamRoleRepository;
pub use repository::TeamRoleRepository;
pub use validation::{validate_team_role_uuid, TeamRoleValidationError};
