//! Cached File Server - A static image server with pluggable in-memory caches
//!
//! Serves `.gif` and `.png` files from a root directory, memoizing file
//! contents in one of three thread-safe cache variants.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod files;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{CacheStrategy, Config};
pub use error::ServerError;
pub use tasks::spawn_stats_reporter;
