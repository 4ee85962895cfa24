//! Team role endpoints, admin only

use axum::{
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use crate::api::middleware::{pipeline_middleware, CurrentIdentity};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::{TeamRole, TeamRoleUpsert};

/// Create the team role router; every route runs the admin pipeline
pub fn create_team_roles_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_team_roles))
        .route("/sync", post(sync_team_roles))
        .route("/{uuid}", get(get_team_role))
        .route_layer(from_fn_with_state(state.admin_pipeline(), pipeline_middleware))
}

/// GET /team-roles
pub async fn list_team_roles(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<TeamRole>>, ApiError> {
    let roles = state.team_roles.get_all().await?;
    let message = format!("{} team roles found.", roles.len());

    Ok(ApiResponse::ok(message, roles))
}

/// GET /team-roles/{uuid}
pub async fn get_team_role(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<ApiResponse<TeamRole>, ApiError> {
    debug!(uuid = %uuid, "Getting team role");

    let role = state
        .team_roles
        .get_by_uuid(&uuid)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team role '{}' not found.", uuid)))?;

    Ok(ApiResponse::ok("Team role found.", role))
}

/// POST /team-roles/sync
pub async fn sync_team_roles(
    State(state): State<AppState>,
    CurrentIdentity(claims): CurrentIdentity,
    Json(roles): Json<Vec<TeamRoleUpsert>>,
) -> Result<ApiResponse<Vec<TeamRole>>, ApiError> {
    let requested = roles.len();
    let synced = state.team_roles.upsert_many(roles).await?;

    info!(user_id = %claims.user_id(), requested, synced = synced.len(), "Team roles synced");

    Ok(ApiResponse::ok(
        format!("{} team roles synced.", synced.len()),
        synced,
    ))
}
