//! Response envelope, error and extractor types

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{ApiResponse, Envelope};
pub use error::ApiError;
pub use json::Json;
