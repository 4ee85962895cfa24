//! Request pipeline
//!
//! An ordered list of steps. Each step gets the request context and either
//! hands an updated context to the next step or terminates the request with
//! an [`AuthError`]. Routers decide which pipeline guards which routes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::auth::{AuthError, IdentityClaims};

/// Request-scoped state the pipeline steps read and extend
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    authorization: Option<String>,
    identity: Option<IdentityClaims>,
}

impl RequestContext {
    /// Context for a request with the given raw `Authorization` header value
    pub fn new(authorization: Option<String>) -> Self {
        Self {
            authorization,
            identity: None,
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn identity(&self) -> Option<&IdentityClaims> {
        self.identity.as_ref()
    }

    pub fn with_identity(mut self, claims: IdentityClaims) -> Self {
        self.identity = Some(claims);
        self
    }

    pub fn into_identity(self) -> Option<IdentityClaims> {
        self.identity
    }
}

/// Result of running a single step
#[derive(Debug)]
pub enum StepOutcome {
    Continue(RequestContext),
    Terminate(AuthError),
}

/// One stage of request processing
#[async_trait]
pub trait PipelineStep: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn apply(&self, ctx: RequestContext) -> StepOutcome;
}

/// Ordered composition of steps
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|s| s.name()))
            .finish()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder pattern)
    pub fn then(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, stopping at the first termination
    pub async fn run(&self, mut ctx: RequestContext) -> Result<RequestContext, AuthError> {
        for step in &self.steps {
            match step.apply(ctx).await {
                StepOutcome::Continue(next) => ctx = next,
                StepOutcome::Terminate(err) => {
                    tracing::debug!(step = step.name(), reason = err.code(), "Pipeline terminated");
                    return Err(err);
                }
            }
        }

        Ok(ctx)
    }
}
