//! TTL Cleanup Task
//!
//! Background task that periodically prunes the server-side caches.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ServerCache;

/// Spawns a task that prunes expired entries every `cleanup_interval_secs`.
///
/// Reads already skip expired entries; this keeps unread ones from holding
/// capacity. Abort the returned handle on shutdown.
pub fn spawn_cleanup_task(cache: Arc<ServerCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "cache cleanup task started");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.prune_expired();
            if removed > 0 {
                info!(removed, "cache cleanup: pruned expired entries");
            } else {
                debug!("cache cleanup: nothing expired");
            }
        }
    })
}
