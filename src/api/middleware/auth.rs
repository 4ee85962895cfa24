//! Pipeline-driven authentication middleware

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::types::ApiError;
use crate::domain::{AuthError, IdentityClaims, Pipeline, RequestContext};

/// Run `pipeline` against the request's `Authorization` header
///
/// On success the resolved identity, if any, is stored in request
/// extensions for [`CurrentIdentity`]. A terminated pipeline answers the
/// request directly and the handler never runs.
pub async fn pipeline_middleware(
    State(pipeline): State<Pipeline>,
    mut request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match pipeline.run(RequestContext::new(authorization)).await {
        Ok(ctx) => {
            if let Some(claims) = ctx.into_identity() {
                request.extensions_mut().insert(CurrentIdentity(claims));
            }
            next.run(request).await
        }
        Err(err) => {
            debug!(code = err.code(), path = %request.uri().path(), "Request rejected by pipeline");
            ApiError::from(err).into_response()
        }
    }
}

/// Extractor for the identity resolved by [`pipeline_middleware`]
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub IdentityClaims);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}
