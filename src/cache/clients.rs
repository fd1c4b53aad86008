//! Client Caches Module
//!
//! The caches that sit in front of the match, player and Data Dragon fetches.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use crate::cache::TtlCache;
use crate::ddragon::StaticData;

pub const MATCH_TTL: Duration = Duration::from_secs(5 * 60);
pub const MATCH_CAPACITY: usize = 200;
pub const TIMELINE_TTL: Duration = Duration::from_secs(5 * 60);
pub const TIMELINE_CAPACITY: usize = 100;
pub const SUMMARY_TTL: Duration = Duration::from_secs(60);
pub const SUMMARY_CAPACITY: usize = 100;
pub const STATIC_DATA_TTL: Duration = Duration::from_secs(60 * 60);
pub const STATIC_DATA_CAPACITY: usize = 4;

// == Client Caches ==
/// The four caches shared by every consumer in one process.
///
/// Built once at the application root and handed out as `Arc<ClientCaches>`;
/// tests construct their own isolated instance.
#[derive(Debug)]
pub struct ClientCaches {
    /// Match detail JSON keyed by match ID
    pub matches: Mutex<TtlCache<Value>>,
    /// Match timeline JSON keyed by match ID
    pub timelines: Mutex<TtlCache<Value>>,
    /// Player summary JSON keyed by PUUID
    pub summaries: Mutex<TtlCache<Value>>,
    /// Parsed Data Dragon tables keyed by version
    pub static_data: Mutex<TtlCache<Arc<StaticData>>>,
}

impl ClientCaches {
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(TtlCache::new(MATCH_CAPACITY)),
            timelines: Mutex::new(TtlCache::new(TIMELINE_CAPACITY)),
            summaries: Mutex::new(TtlCache::new(SUMMARY_CAPACITY)),
            static_data: Mutex::new(TtlCache::new(STATIC_DATA_CAPACITY)),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn cached_match(&self, match_id: &str) -> Option<Value> {
        self.matches.lock().get(match_id)
    }

    pub fn store_match(&self, match_id: &str, value: Value) {
        self.matches.lock().set(match_id, value, MATCH_TTL);
    }

    pub fn cached_timeline(&self, match_id: &str) -> Option<Value> {
        self.timelines.lock().get(match_id)
    }

    pub fn store_timeline(&self, match_id: &str, value: Value) {
        self.timelines.lock().set(match_id, value, TIMELINE_TTL);
    }

    pub fn cached_summary(&self, puuid: &str) -> Option<Value> {
        self.summaries.lock().get(puuid)
    }

    pub fn store_summary(&self, puuid: &str, value: Value) {
        self.summaries.lock().set(puuid, value, SUMMARY_TTL);
    }

    pub fn cached_static_data(&self, version: &str) -> Option<Arc<StaticData>> {
        self.static_data.lock().get(version)
    }

    pub fn store_static_data(&self, version: &str, data: Arc<StaticData>) {
        self.static_data.lock().set(version, data, STATIC_DATA_TTL);
    }

    /// Prunes expired entries from every cache, returning the total removed.
    pub fn prune_expired(&self) -> usize {
        self.matches.lock().prune_expired()
            + self.timelines.lock().prune_expired()
            + self.summaries.lock().prune_expired()
            + self.static_data.lock().prune_expired()
    }
}

impl Default for ClientCaches {
    fn default() -> Self {
        Self::new()
    }
}
