//! Access-token refresh

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::jwt::TokenService;
use crate::domain::auth::{AuthError, TokenBlacklist, TokenKind};

/// Body of a refresh call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl RefreshRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
        }
    }
}

/// Newly minted access token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
}

/// Exchanges a refresh token for a fresh access token
///
/// The refresh token itself is not rotated and stays usable.
#[derive(Clone)]
pub struct RefreshHandler {
    tokens: Arc<dyn TokenService>,
    blacklist: Arc<dyn TokenBlacklist>,
}

impl std::fmt::Debug for RefreshHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHandler")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl RefreshHandler {
    pub fn new(tokens: Arc<dyn TokenService>, blacklist: Arc<dyn TokenBlacklist>) -> Self {
        Self { tokens, blacklist }
    }

    pub async fn refresh(&self, request: RefreshRequest) -> Result<RefreshedToken, AuthError> {
        let token = request
            .refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let claims = self.tokens.verify_refresh(token).map_err(|e| {
            debug!(error = %e, "Refresh token failed verification");
            AuthError::InvalidRefreshToken
        })?;

        if self.blacklist.is_token_blacklisted(token).await? {
            debug!(user_id = %claims.user_id(), "Blacklisted refresh token");
            return Err(AuthError::Blacklisted(TokenKind::Refresh));
        }

        let access_token = self.tokens.issue_access(&claims.identity())?;
        info!(user_id = %claims.user_id(), "Issued refreshed access token");

        Ok(RefreshedToken { access_token })
    }
}
