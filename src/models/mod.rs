//! Models Module
//!
//! Request parsing and response DTOs for the file server API.

pub mod requests;
pub mod responses;

pub use requests::{FileRequest, ImageKind};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
