//! Cache Module
//!
//! In-memory TTL caching with FIFO capacity eviction, the shared client
//! caches built on it, and the caches owned by the HTTP server.

mod clients;
mod entry;
mod order;
mod server;
mod stats;
mod store;


pub use clients::{
    ClientCaches, MATCH_CAPACITY, MATCH_TTL, STATIC_DATA_CAPACITY, STATIC_DATA_TTL,
    SUMMARY_CAPACITY, SUMMARY_TTL, TIMELINE_CAPACITY, TIMELINE_TTL,
};
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use server::{leaderboard_tag, ServerCache, ServerCacheStats, BANNER_TTL};
pub use stats::CacheStats;
pub use store::TtlCache;
