//! API Handlers
//!
//! HTTP request handlers for each file server endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use crate::cache::{build_store, CacheCounters, CacheStats, CacheStore};
use crate::config::{CacheStrategy, Config};
use crate::error::Result;
use crate::files::load_file;
use crate::models::{FileRequest, HealthResponse, StatsResponse};

/// Cache shared by all handlers: file name to file contents.
pub type FileCache = dyn CacheStore<String, Bytes>;

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers share it through a plain
/// `Arc` and never hold a lock across an `.await`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe file cache
    pub cache: Arc<FileCache>,
    /// Hit/miss counters
    pub counters: Arc<CacheCounters>,
    /// Directory searched for requested files
    pub root_dir: Arc<PathBuf>,
    /// Variant backing `cache`, reported by /stats
    pub strategy: CacheStrategy,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Arc<FileCache>, strategy: CacheStrategy, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            counters: Arc::new(CacheCounters::new()),
            root_dir: Arc::new(root_dir.into()),
            strategy,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured LRU capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = build_store(config.cache_strategy, config.cache_capacity)?;
        Ok(Self::new(cache, config.cache_strategy, config.root_dir.clone()))
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(&*self.cache)
    }
}

/// Handler for GET /*path
///
/// Serves a `.gif` or `.png` file found anywhere under the root directory,
/// memoizing its bytes in the cache keyed by file name.
///
/// On a miss the file is read outside any cache lock and then inserted. The
/// freshly read bytes are served even if another request won the insert.
pub async fn file_handler(
    State(state): State<AppState>,
    path: Option<Path<String>>,
) -> Result<Response> {
    let path = path.map(|Path(p)| p).unwrap_or_default();
    let request = FileRequest::parse(&path)?;

    let (body, cache) = match state.cache.lookup(&request.file_name) {
        Some(bytes) => {
            state.counters.record_hit();
            (bytes, "hit")
        }
        None => {
            state.counters.record_miss();

            let bytes = load_file(&state.root_dir, &request.file_name)
                .await
                .map_err(|e| {
                    if e.status_code().is_server_error() {
                        error!(file = %request.file_name, error = %e, "Failed to load file");
                    }
                    e
                })?;
            state.cache.insert(request.file_name.clone(), bytes.clone());
            (bytes, "miss")
        }
    };

    info!(
        file = %request.file_name,
        cache,
        content_type = request.kind.content_type(),
        bytes = body.len(),
        "Serving file"
    );

    Ok(([(header::CONTENT_TYPE, request.kind.content_type())], body).into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.stats();
    Json(StatsResponse::new(
        state.strategy,
        state.cache.capacity(),
        &stats,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
