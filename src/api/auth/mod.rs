//! Authentication API endpoints
//!
//! Token refresh and the current identity. Tokens are minted elsewhere.

use axum::{
    body::Bytes,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::api::middleware::{pipeline_middleware, CurrentIdentity};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse};
use crate::domain::auth::SubjectId;
use crate::infrastructure::auth::{RefreshRequest, RefreshedToken};

/// Create the authentication router
pub fn create_auth_router(state: &AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/me", get(current_identity))
        .route_layer(from_fn_with_state(
            state.authenticated_pipeline(),
            pipeline_middleware,
        ));

    Router::new().route("/refresh", post(refresh)).merge(guarded)
}

/// Identity decoded from the access token
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: SubjectId,
    pub email: String,
    pub role: String,
}

/// POST /auth/refresh
///
/// An empty body counts as a missing refresh token rather than bad JSON.
pub async fn refresh(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<RefreshedToken>, ApiError> {
    let request = parse_refresh_request(&body)?;
    let token = state.refresh_handler.refresh(request).await?;

    Ok(ApiResponse::ok("New access token issued.", token))
}

fn parse_refresh_request(body: &[u8]) -> Result<RefreshRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RefreshRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        ApiError::bad_request(format!("Invalid JSON body: {}", e)).with_code("json_parse_error")
    })
}

/// GET /auth/me
pub async fn current_identity(
    CurrentIdentity(claims): CurrentIdentity,
) -> ApiResponse<IdentityResponse> {
    ApiResponse::ok(
        "Authenticated.",
        IdentityResponse {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        },
    )
}
