//! Authentication infrastructure module
//!
//! JWT handling plus the three request-facing pieces: the bearer-token
//! authenticator, the role gate and the refresh handler.

mod authenticator;
mod jwt;
mod refresh;
mod role_gate;

pub use authenticator::{bearer_token, TokenAuthenticator};
pub use jwt::{
    JwtConfig, JwtService, TokenError, TokenService, DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
};
pub use refresh::{RefreshHandler, RefreshRequest, RefreshedToken};
pub use role_gate::RoleGate;
