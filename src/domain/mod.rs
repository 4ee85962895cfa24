//! Domain layer - Core types, contracts and the request pipeline

pub mod auth;
pub mod error;
pub mod pipeline;
pub mod team_role;

pub use auth::{AuthError, Identity, IdentityClaims, SubjectId, TokenBlacklist, TokenKind};
pub use error::DomainError;
pub use pipeline::{Pipeline, PipelineStep, RequestContext, StepOutcome};
pub use team_role::{TeamRole, TeamRoleRepository, TeamRoleUpsert, TeamRoleValidationError};
