//! Server Cache Module
//!
//! Caches owned by the HTTP server: proxied match data, and banner lookups
//! tagged by leaderboard so they can be revalidated on demand.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use crate::models::BannerUrlResponse;

pub const BANNER_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache tag covering everything derived from one leaderboard.
pub fn leaderboard_tag(leaderboard_id: &str) -> String {
    format!("leaderboard:{}", leaderboard_id)
}

#[derive(Debug)]
struct BannerCache {
    entries: TtlCache<BannerUrlResponse>,
    /// tag -> slugs cached under it
    tags: HashMap<String, HashSet<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerCacheStats {
    pub matches: CacheStats,
    pub timelines: CacheStats,
    pub banners: CacheStats,
}

#[derive(Debug)]
pub struct ServerCache {
    matches: Mutex<TtlCache<Value>>,
    timelines: Mutex<TtlCache<Value>>,
    banners: Mutex<BannerCache>,
    match_ttl: Duration,
}

impl ServerCache {
    pub fn new(capacity: usize, match_ttl: Duration) -> Self {
        Self {
            matches: Mutex::new(TtlCache::new(capacity)),
            timelines: Mutex::new(TtlCache::new(capacity)),
            banners: Mutex::new(BannerCache {
                entries: TtlCache::new(capacity),
                tags: HashMap::new(),
            }),
            match_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_max_entries, Duration::from_secs(config.cache_ttl_secs))
    }

    pub fn cached_match(&self, match_id: &str) -> Option<Value> {
        self.matches.lock().get(match_id)
    }

    pub fn store_match(&self, match_id: &str, value: Value) {
        self.matches.lock().set(match_id, value, self.match_ttl);
    }

    pub fn cached_timeline(&self, match_id: &str) -> Option<Value> {
        self.timelines.lock().get(match_id)
    }

    pub fn store_timeline(&self, match_id: &str, value: Value) {
        self.timelines.lock().set(match_id, value, self.match_ttl);
    }

    pub fn cached_banner(&self, slug: &str) -> Option<BannerUrlResponse> {
        self.banners.lock().entries.get(slug)
    }

    /// Caches a banner lookup for `slug` under the leaderboard's tag.
    pub fn store_banner(&self, slug: &str, leaderboard_id: &str, banner: BannerUrlResponse) {
        let mut banners = self.banners.lock();
        banners.entries.set(slug, banner, BANNER_TTL);
        banners
            .tags
            .entry(leaderboard_tag(leaderboard_id))
            .or_default()
            .insert(slug.to_string());
    }

    /// Drops every entry cached under `tag`, returning how many were removed.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let mut banners = self.banners.lock();
        let Some(slugs) = banners.tags.remove(tag) else {
            return 0;
        };
        slugs
            .iter()
            .filter(|slug| banners.entries.remove(slug).is_some())
            .count()
    }

    pub fn invalidate_leaderboard(&self, leaderboard_id: &str) -> usize {
        self.invalidate_tag(&leaderboard_tag(leaderboard_id))
    }

    /// Prunes expired entries from every cache, returning the total removed.
    pub fn prune_expired(&self) -> usize {
        let banners_removed = {
            let mut banners = self.banners.lock();
            let removed = banners.entries.prune_expired();
            let live: HashSet<String> = banners.entries.keys().into_iter().collect();
            banners.tags.retain(|_, slugs| {
                slugs.retain(|slug| live.contains(slug));
                !slugs.is_empty()
            });
            removed
        };
        self.matches.lock().prune_expired() + self.timelines.lock().prune_expired() + banners_removed
    }

    pub fn stats(&self) -> ServerCacheStats {
        ServerCacheStats {
            matches: self.matches.lock().stats(),
            timelines: self.timelines.lock().stats(),
            banners: self.banners.lock().entries.stats(),
        }
    }
}
