//! Services Module
//!
//! The external collaborators the API handlers depend on, behind traits so
//! handlers can be exercised against in-memory doubles.
//!
//! - [`RiotApi`] / [`RiotOAuth`]: Riot platform APIs and Riot sign-on
//! - [`AuthProvider`], [`LeaderboardStore`], [`ObjectStorage`]: the hosted
//!   Auth, Postgres and Storage APIs

mod riot;
mod supabase;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::{
    AuthUser, LeagueEntry, Leaderboard, RiotAccount, RiotUserInfo, Session, Summoner,
    TokenResponse,
};

pub use riot::{region_for_match_id, RiotClient};
pub use supabase::SupabaseClient;

/// Read-only Riot platform data. "Not found" is `Ok(None)`, not an error.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn match_by_id(&self, match_id: &str) -> Result<Option<Value>, UpstreamError>;

    async fn match_timeline(&self, match_id: &str) -> Result<Option<Value>, UpstreamError>;

    async fn match_ids_by_puuid(&self, puuid: &str, count: u32) -> Result<Vec<String>, UpstreamError>;

    async fn account_by_puuid(&self, puuid: &str) -> Result<Option<RiotAccount>, UpstreamError>;

    async fn summoner_by_puuid(&self, puuid: &str) -> Result<Option<Summoner>, UpstreamError>;

    async fn league_entries_by_puuid(&self, puuid: &str) -> Result<Vec<LeagueEntry>, UpstreamError>;
}

/// Riot sign-on (authorization code flow).
#[async_trait]
pub trait RiotOAuth: Send + Sync {
    /// URL to send the browser to, carrying `state` for CSRF protection.
    fn authorize_url(&self, state: &str) -> Result<String, UpstreamError>;

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, UpstreamError>;

    async fn userinfo(&self, access_token: &str) -> Result<RiotUserInfo, UpstreamError>;

    /// The signed-in player's Riot ID, if Riot will tell us.
    async fn account_me(&self, access_token: &str) -> Result<Option<RiotAccount>, UpstreamError>;
}

/// Hosted Auth. Sessions are minted through a magic link that is generated
/// and verified server-side, never emailed.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves a session access token; `Ok(None)` when the token is rejected.
    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>, UpstreamError>;

    /// Creates a confirmed user for `email` unless one exists. Returns whether it was created.
    async fn ensure_user(&self, email: &str, metadata: Value) -> Result<bool, UpstreamError>;

    /// Mints a magic link for `email` and returns its hashed token.
    async fn generate_magic_link(&self, email: &str) -> Result<String, UpstreamError>;

    /// Exchanges a magic-link token hash for a session.
    async fn verify_magic_link(&self, token_hash: &str) -> Result<Session, UpstreamError>;
}

/// The `leaderboards` table.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn leaderboard_by_id(&self, id: &str) -> Result<Option<Leaderboard>, UpstreamError>;

    async fn leaderboard_by_slug(&self, slug: &str) -> Result<Option<Leaderboard>, UpstreamError>;

    /// Points the leaderboard at a new banner object.
    async fn set_banner(&self, id: &str, path: &str, updated_at: DateTime<Utc>) -> Result<(), UpstreamError>;
}

/// The banner bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Writes `bytes` at `path`, replacing any existing object.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), UpstreamError>;

    /// A URL granting read access to `path` for `expires_in`.
    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, UpstreamError>;
}
