//! Riftboard - leaderboard backend for League of Legends clubs
//!
//! Match and player proxies over the Riot API, banner storage, Riot sign-on
//! bridged onto hosted auth, and the caching and prefetching used to render
//! match history.

pub mod api;
pub mod cache;
pub mod config;
pub mod ddragon;
pub mod error;
pub mod models;
pub mod prefetch;
pub mod services;
pub mod tasks;

pub use api::{create_router, AppState, Services};
pub use config::Config;
pub use error::{ApiError, UpstreamError};
pub use tasks::spawn_cleanup_task;
