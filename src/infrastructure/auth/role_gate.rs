//! Role-based access gate

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::auth::{AuthError, IdentityClaims};
use crate::domain::pipeline::{PipelineStep, RequestContext, StepOutcome};

/// Allows a request only if the authenticated role is in a fixed set
///
/// Must run after authentication; a context without identity is denied.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: BTreeSet<String>,
}

impl RoleGate {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, role: &str) -> bool {
        self.allowed.contains(role)
    }

    pub fn check(&self, identity: Option<&IdentityClaims>) -> Result<(), AuthError> {
        match identity {
            Some(claims) if self.allows(claims.role()) => Ok(()),
            Some(claims) => {
                debug!(user_id = %claims.user_id(), role = %claims.role(), "Role not allowed");
                Err(AuthError::Forbidden)
            }
            None => Err(AuthError::Forbidden),
        }
    }
}

#[async_trait]
impl PipelineStep for RoleGate {
    fn name(&self) -> &'static str {
        "authorize_roles"
    }

    async fn apply(&self, ctx: RequestContext) -> StepOutcome {
        match self.check(ctx.identity()) {
            Ok(()) => StepOutcome::Continue(ctx),
            Err(e) => StepOutcome::Terminate(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Identity;
    use chrono::Duration;

    fn claims(role: &str) -> IdentityClaims {
        IdentityClaims::new(&Identity::new("u-1", "u@example.org", role), Duration::minutes(5)).unwrap()
    }

    #[test]
    fn test_allowed_role() {
        let gate = RoleGate::new(["admin"]);
        assert!(gate.check(Some(&claims("admin"))).is_ok());
    }

    #[test]
    fn test_denied_role() {
        let gate = RoleGate::new(["admin"]);
        let err = gate.check(Some(&claims("user"))).unwrap_err();

        assert!(matches!(err, AuthError::Forbidden));
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_string(), "Access denied. Insufficient permissions.");
    }

    #[test]
    fn test_roles_are_case_sensitive() {
        let gate = RoleGate::new(vec!["admin".to_string(), "manager".to_string()]);

        assert!(gate.allows("manager"));
        assert!(!gate.allows("Admin"));
    }

    #[test]
    fn test_missing_identity() {
        let gate = RoleGate::new(["admin"]);
        assert!(matches!(gate.check(None), Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_pipeline_step() {
        let gate = RoleGate::new(["admin"]);

        let allowed = gate.apply(RequestContext::default().with_identity(claims("admin"))).await;
        assert!(matches!(allowed, StepOutcome::Continue(_)));

        let denied = gate.apply(RequestContext::default().with_identity(claims("user"))).await;
        assert!(matches!(denied, StepOutcome::Terminate(AuthError::Forbidden)));
    }
}
