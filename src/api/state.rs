//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::ServerCache;
use crate::config::Config;
use crate::error::UpstreamError;
use crate::services::{
    AuthProvider, LeaderboardStore, ObjectStorage, RiotApi, RiotClient, RiotOAuth, SupabaseClient,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// The external collaborators behind the handlers.
#[derive(Clone)]
pub struct Services {
    pub riot: Arc<dyn RiotApi>,
    pub oauth: Arc<dyn RiotOAuth>,
    pub auth: Arc<dyn AuthProvider>,
    pub leaderboards: Arc<dyn LeaderboardStore>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl Services {
    /// Vendor-backed services sharing one connection pool.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let riot = Arc::new(RiotClient::from_config(http.clone(), config));
        let supabase = Arc::new(SupabaseClient::from_config(http, config));

        Ok(Self {
            riot: riot.clone(),
            oauth: riot,
            auth: supabase.clone(),
            leaderboards: supabase.clone(),
            storage: supabase,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub riot: Arc<dyn RiotApi>,
    pub oauth: Arc<dyn RiotOAuth>,
    pub auth: Arc<dyn AuthProvider>,
    pub leaderboards: Arc<dyn LeaderboardStore>,
    pub storage: Arc<dyn ObjectStorage>,
    /// Match proxy and banner caches
    pub cache: Arc<ServerCache>,
}

impl AppState {
    pub fn new(config: Config, services: Services) -> Self {
        let cache = Arc::new(ServerCache::from_config(&config));
        Self {
            config: Arc::new(config),
            riot: services.riot,
            oauth: services.oauth,
            auth: services.auth,
            leaderboards: services.leaderboards,
            storage: services.storage,
            cache,
        }
    }

    pub fn from_config(config: Config) -> Result<Self, UpstreamError> {
        let services = Services::from_config(&config)?;
        Ok(Self::new(config, services))
    }
}
