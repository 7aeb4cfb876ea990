//! API Module
//!
//! HTTP handlers and routing for the file server.
//!
//! # Endpoints
//! - `GET /*path` - Serve a cached `.gif` or `.png` file
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
