//! Bearer access-token authentication

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::jwt::{TokenError, TokenService};
use crate::domain::auth::{AuthError, IdentityClaims, TokenBlacklist, TokenKind};
use crate::domain::pipeline::{PipelineStep, RequestContext, StepOutcome};

/// Verifies access tokens and checks both blacklist sets
#[derive(Clone)]
pub struct TokenAuthenticator {
    tokens: Arc<dyn TokenService>,
    blacklist: Arc<dyn TokenBlacklist>,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl TokenAuthenticator {
    pub fn new(tokens: Arc<dyn TokenService>, blacklist: Arc<dyn TokenBlacklist>) -> Self {
        Self { tokens, blacklist }
    }

    /// Authenticate a request from its raw `Authorization` header value
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<IdentityClaims, AuthError> {
        let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify_access(token).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid(reason) => {
                debug!(%reason, "Access token failed verification");
                AuthError::InvalidToken
            }
        })?;

        let user_id = claims.user_id();
        let (token_revoked, user_revoked) = tokio::try_join!(
            self.blacklist.is_token_blacklisted(token),
            self.blacklist.is_all_tokens_blacklisted(&user_id),
        )?;

        if token_revoked || user_revoked {
            debug!(%user_id, token_revoked, user_revoked, "Blacklisted access token");
            return Err(AuthError::Blacklisted(TokenKind::Access));
        }

        Ok(claims)
    }
}

#[async_trait]
impl PipelineStep for TokenAuthenticator {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    async fn apply(&self, ctx: RequestContext) -> StepOutcome {
        let result = self.authenticate(ctx.authorization()).await;

        match result {
            Ok(claims) => StepOutcome::Continue(ctx.with_identity(claims)),
            Err(AuthError::Internal(e)) => {
                warn!(error = %e, "Blacklist lookup failed");
                StepOutcome::Terminate(AuthError::Internal(e))
            }
            Err(e) => StepOutcome::Terminate(e),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value
///
/// The scheme is matched case-insensitively; anything else, or an empty
/// token, counts as no token.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let value = authorization?.trim();
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();

    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{Identity, MockTokenBlacklist};
    use crate::domain::DomainError;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::blacklist::InMemoryTokenBlacklist;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const ACCESS: &str = "access-secret";

    fn tokens() -> Arc<JwtService> {
        Arc::new(JwtService::new(JwtConfig::new(ACCESS, "refresh-secret")))
    }

    fn identity() -> Identity {
        Identity::new("user-1", "jane@example.org", "user")
    }

    fn setup() -> (TokenAuthenticator, Arc<JwtService>, InMemoryTokenBlacklist) {
        let tokens = tokens();
        let blacklist = InMemoryTokenBlacklist::new();
        let authenticator = TokenAuthenticator::new(tokens.clone(), Arc::new(blacklist.clone()));
        (authenticator, tokens, blacklist)
    }

    fn header(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("bearer   abc  ")), Some("abc"));
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (authenticator, _, _) = setup();

        let err = authenticator.authenticate(None).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
        assert_eq!(err.to_string(), "Authentication failed. No token provided.");
    }

    #[tokio::test]
    async fn test_valid_token() {
        let (authenticator, tokens, _) = setup();
        let token = tokens.issue_access(&identity()).unwrap();

        let claims = authenticator.authenticate(Some(&header(&token))).await.unwrap();
        assert_eq!(claims.identity(), identity());
    }

    #[tokio::test]
    async fn test_foreign_signature() {
        let (authenticator, _, _) = setup();
        let foreign = JwtService::new(JwtConfig::new("not-the-access-secret", "x"));
        let token = foreign.issue_access(&identity()).unwrap();

        let err = authenticator.authenticate(Some(&header(&token))).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (authenticator, _, _) = setup();
        let now = Utc::now().timestamp();
        let claims = IdentityClaims {
            id: "user-1".into(),
            email: "jane@example.org".to_string(),
            role: "user".to_string(),
            iat: now - 900,
            exp: now - 1,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(ACCESS.as_bytes()))
            .unwrap();

        let err = authenticator.authenticate(Some(&header(&token))).await.unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
        assert_eq!(err.to_string(), "Access token expired. Please refresh your token.");
    }

    #[tokio::test]
    async fn test_token_blacklisted() {
        let (authenticator, tokens, blacklist) = setup();
        let token = tokens.issue_access(&identity()).unwrap();
        blacklist.blacklist_token(token.clone()).await;

        let err = authenticator.authenticate(Some(&header(&token))).await.unwrap_err();
        assert!(matches!(err, AuthError::Blacklisted(TokenKind::Access)));
    }

    #[tokio::test]
    async fn test_all_user_tokens_blacklisted() {
        let (authenticator, tokens, blacklist) = setup();
        let token = tokens.issue_access(&identity()).unwrap();
        blacklist.blacklist_all_for_user("user-1").await;

        let err = authenticator.authenticate(Some(&header(&token))).await.unwrap_err();
        assert!(matches!(err, AuthError::Blacklisted(TokenKind::Access)));
    }

    #[tokio::test]
    async fn test_both_blacklist_sets_are_consulted() {
        let tokens = tokens();
        let token = tokens.issue_access(&identity()).unwrap();

        let mut blacklist = MockTokenBlacklist::new();
        blacklist
            .expect_is_token_blacklisted()
            .times(1)
            .returning(|_| Ok(false));
        blacklist
            .expect_is_all_tokens_blacklisted()
            .withf(|user_id| user_id == "user-1")
            .times(1)
            .returning(|_| Ok(false));

        let authenticator = TokenAuthenticator::new(tokens, Arc::new(blacklist));
        assert!(authenticator.authenticate(Some(&header(&token))).await.is_ok());
    }

    #[tokio::test]
    async fn test_blacklist_failure_is_not_acceptance() {
        let tokens = tokens();
        let token = tokens.issue_access(&identity()).unwrap();

        let mut blacklist = MockTokenBlacklist::new();
        blacklist
            .expect_is_token_blacklisted()
            .returning(|_| Err(DomainError::blacklist("connection reset")));
        blacklist
            .expect_is_all_tokens_blacklisted()
            .returning(|_| Ok(false));

        let authenticator = TokenAuthenticator::new(tokens, Arc::new(blacklist));
        let err = authenticator.authenticate(Some(&header(&token))).await.unwrap_err();

        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_pipeline_step_attaches_identity() {
        let (authenticator, tokens, _) = setup();
        let token = tokens.issue_access(&identity()).unwrap();

        let outcome = authenticator
            .apply(RequestContext::new(Some(header(&token))))
            .await;

        match outcome {
            StepOutcome::Continue(ctx) => {
                assert_eq!(ctx.identity().map(|c| c.user_id()).as_deref(), Some("user-1"));
            }
            StepOutcome::Terminate(e) => panic!("unexpected termination: {}", e),
        }
    }
}
