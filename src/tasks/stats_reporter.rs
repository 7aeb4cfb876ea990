//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that logs cache statistics every interval.
///
/// A line is only logged at `info` when traffic arrived since the previous
/// report; idle periods are logged at `debug`.
///
/// # Arguments
/// * `state` - shared application state holding the cache and counters
/// * `interval_secs` - seconds between reports (must be non-zero)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let reporter = spawn_stats_reporter(state.clone(), 60);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter(state: AppState, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        let mut last_requests = 0;
        loop {
            tokio::time::sleep(interval).await;

            let stats = state.stats();
            let requests = stats.hits + stats.misses;
            if requests > last_requests {
                info!(
                    strategy = %state.strategy,
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Cache stats"
                );
            } else {
                debug!("Cache stats: no requests since last report");
            }
            last_requests = requests;
        }
    })
}
