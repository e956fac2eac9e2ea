//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod jobs;
pub mod state;

pub use error::{ApiError, ApiResult};
