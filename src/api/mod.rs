//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod team_roles;
pub mod types;

pub use middleware::CurrentIdentity;
pub use router::create_router;
pub use state::AppState;
