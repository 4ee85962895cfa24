//! Infrastructure layer - External service implementations

pub mod auth;
pub mod blacklist;
pub mod logging;
pub mod storage;
pub mod team_role;
