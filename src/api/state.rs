//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Pipeline, TeamRoleRepository, TokenBlacklist};
use crate::infrastructure::auth::{RefreshHandler, RoleGate, TokenAuthenticator, TokenService};

/// Shared handles cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<TokenAuthenticator>,
    pub admin_gate: Arc<RoleGate>,
    pub refresh_handler: Arc<RefreshHandler>,
    pub team_roles: Arc<dyn TeamRoleRepository>,
}

impl AppState {
    pub fn new(
        tokens: Arc<dyn TokenService>,
        blacklist: Arc<dyn TokenBlacklist>,
        team_roles: Arc<dyn TeamRoleRepository>,
        admin_roles: Vec<String>,
    ) -> Self {
        Self {
            authenticator: Arc::new(TokenAuthenticator::new(tokens.clone(), blacklist.clone())),
            admin_gate: Arc::new(RoleGate::new(admin_roles)),
            refresh_handler: Arc::new(RefreshHandler::new(tokens, blacklist)),
            team_roles,
        }
    }

    /// Authenticator only
    pub fn authenticated_pipeline(&self) -> Pipeline {
        Pipeline::new().then(self.authenticator.clone())
    }

    /// Authenticator followed by the admin role gate
    pub fn admin_pipeline(&self) -> Pipeline {
        self.authenticated_pipeline().then(self.admin_gate.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("authenticator", &self.authenticator)
            .field("admin_gate", &self.admin_gate)
            .finish_non_exhaustive()
    }
}
