//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables (or a `.env` file)
/// with defaults suitable for local development. Secrets default to empty,
/// which the services treat as "not configured".
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Public origin of the web app, used for redirects
    pub app_base_url: String,

    /// Riot platform API key (`X-Riot-Token`)
    pub riot_api_key: String,
    /// Platform routing value, e.g. `na1`
    pub riot_platform: String,
    /// Regional routing value, e.g. `americas`
    pub riot_region: String,
    /// Overrides `https://{host}.api.riotgames.com`, for testing
    pub riot_api_base_url: Option<String>,

    /// Riot sign-on client credentials
    pub riot_client_id: String,
    pub riot_client_secret: String,
    pub riot_redirect_uri: String,
    /// Riot sign-on host
    pub riot_auth_base_url: String,

    /// Hosted backend project URL
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: String,
    /// Storage bucket holding leaderboard banners
    pub banner_bucket: String,

    /// Shared secret expected in `x-internal-secret`
    pub internal_secret: String,

    /// Capacity of each server-side cache
    pub cache_max_entries: usize,
    /// TTL in seconds of proxied match data
    pub cache_ttl_secs: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` (default: 3000)
    /// - `APP_BASE_URL` (default: `http://localhost:3000`)
    /// - `RIOT_API_KEY`, `RIOT_PLATFORM` (na1), `RIOT_REGION` (americas), `RIOT_API_BASE_URL`
    /// - `RIOT_CLIENT_ID`, `RIOT_CLIENT_SECRET`, `RIOT_REDIRECT_URI`, `RIOT_AUTH_BASE_URL`
    /// - `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_SERVICE_ROLE_KEY`
    /// - `BANNER_BUCKET` (default: leaderboard-banners)
    /// - `INTERNAL_REVALIDATE_SECRET`
    /// - `CACHE_MAX_ENTRIES` (default: 500), `CACHE_TTL` (default: 300), `CLEANUP_INTERVAL` (default: 30)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let app_base_url = var_or("APP_BASE_URL", &defaults.app_base_url);
        let riot_redirect_uri = env::var("RIOT_REDIRECT_URI")
            .unwrap_or_else(|_| format!("{}/api/auth/riot/callback", app_base_url.trim_end_matches('/')));

        Self {
            server_port: parsed_or("SERVER_PORT", defaults.server_port),
            app_base_url,
            riot_api_key: var_or("RIOT_API_KEY", ""),
            riot_platform: var_or("RIOT_PLATFORM", &defaults.riot_platform),
            riot_region: var_or("RIOT_REGION", &defaults.riot_region),
            riot_api_base_url: env::var("RIOT_API_BASE_URL").ok(),
            riot_client_id: var_or("RIOT_CLIENT_ID", ""),
            riot_client_secret: var_or("RIOT_CLIENT_SECRET", ""),
            riot_redirect_uri,
            riot_auth_base_url: var_or("RIOT_AUTH_BASE_URL", &defaults.riot_auth_base_url),
            supabase_url: var_or("SUPABASE_URL", ""),
            supabase_anon_key: var_or("SUPABASE_ANON_KEY", ""),
            supabase_service_role_key: var_or("SUPABASE_SERVICE_ROLE_KEY", ""),
            banner_bucket: var_or("BANNER_BUCKET", &defaults.banner_bucket),
            internal_secret: var_or("INTERNAL_REVALIDATE_SECRET", ""),
            cache_max_entries: parsed_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl_secs: parsed_or("CACHE_TTL", defaults.cache_ttl_secs),
            cleanup_interval: parsed_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    /// Whether the `Secure` attribute should be set on cookies.
    pub fn secure_cookies(&self) -> bool {
        self.app_base_url.starts_with("https://")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            app_base_url: "http://localhost:3000".to_string(),
            riot_api_key: String::new(),
            riot_platform: "na1".to_string(),
            riot_region: "americas".to_string(),
            riot_api_base_url: None,
            riot_client_id: String::new(),
            riot_client_secret: String::new(),
            riot_redirect_uri: "http://localhost:3000/api/auth/riot/callback".to_string(),
            riot_auth_base_url: "https://auth.riotgames.com".to_string(),
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_role_key: String::new(),
            banner_bucket: "leaderboard-banners".to_string(),
            internal_secret: String::new(),
            cache_max_entries: 500,
            cache_ttl_secs: 300,
            cleanup_interval: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.riot_platform, "na1");
        assert_eq!(config.riot_region, "americas");
        assert_eq!(config.banner_bucket, "leaderboard-banners");
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(config.internal_secret.is_empty());
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("RIOT_REGION");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_max_entries, 500);
        assert_eq!(config.riot_region, "americas");
    }
}
