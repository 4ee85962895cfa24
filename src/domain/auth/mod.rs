//! Authentication domain module
//!
//! Token claims, the failure taxonomy shared by the authenticator, role gate
//! and refresh handler, and the blacklist contract.

mod blacklist;
mod claims;
mod error;

#[cfg(test)]
pub use blacklist::MockTokenBlacklist;
pub use blacklist::TokenBlacklist;
pub use claims::{Identity, IdentityClaims, SubjectId};
pub use error::{AuthError, TokenKind};
