//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::{pipeline_middleware, CurrentIdentity};
pub use logging::logging_middleware;
