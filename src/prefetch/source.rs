//! Where prefetched match data comes from.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ClientCaches;
use crate::error::UpstreamError;
use crate::models::{MatchEnvelope, MatchIdsResponse, TimelineEnvelope};

/// Fetches match detail and timeline JSON.
///
/// Implementations never fail: anything that goes wrong resolves to `None`.
#[async_trait]
pub trait MatchSource: Send + Sync {
    async fn fetch_match(&self, match_id: &str) -> Option<Value>;

    async fn fetch_timeline(&self, match_id: &str) -> Option<Value>;
}

/// Hint that prefetches should not compete with what the user is looking at.
const LOW_PRIORITY: &str = "u=5";

// == HTTP Match Source ==
/// Reads the application's own API (`/api/match/...`) through the client caches.
#[derive(Clone)]
pub struct HttpMatchSource {
    http: Client,
    base_url: Url,
    caches: Arc<ClientCaches>,
}

impl HttpMatchSource {
    pub fn new(http: Client, base_url: &str, caches: Arc<ClientCaches>) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::Config(format!("invalid API base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Config(format!("API base URL {} cannot be a base", base_url)));
        }
        Ok(Self {
            http,
            base_url,
            caches,
        })
    }

    pub fn caches(&self) -> &Arc<ClientCaches> {
        &self.caches
    }

    /// Player summary JSON (`/api/player/{puuid}/summary`), cached per PUUID.
    pub async fn player_summary(&self, puuid: &str) -> Option<Value> {
        if let Some(cached) = self.caches.cached_summary(puuid) {
            return Some(cached);
        }
        let url = self.endpoint(&["api", "player", puuid, "summary"]);
        let summary: Value = self.fetch(url, "player summary", puuid).await?;
        self.caches.store_summary(puuid, summary.clone());
        Some(summary)
    }

    /// Recent match IDs for a player, newest first. Not cached.
    pub async fn player_match_ids(&self, puuid: &str, limit: u32) -> Option<Vec<String>> {
        let mut url = self.endpoint(&["api", "player", puuid, "matches"]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let response: MatchIdsResponse = self.fetch(url, "match list", puuid).await?;
        Some(response.match_ids)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, what: &str, id: &str) -> Option<T> {
        match self.get_json(url).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(id, error = %err, "failed to fetch {}", what);
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let response = self
            .http
            .get(url)
            .header(header::HeaderName::from_static("priority"), LOW_PRIORITY)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MatchSource for HttpMatchSource {
    async fn fetch_match(&self, match_id: &str) -> Option<Value> {
        if let Some(cached) = self.caches.cached_match(match_id) {
            debug!(match_id, "match cache hit");
            return Some(cached);
        }
        let url = self.endpoint(&["api", "match", match_id]);
        let envelope: MatchEnvelope = self.fetch(url, "match", match_id).await?;
        let data = envelope.match_data?;
        self.caches.store_match(match_id, data.clone());
        Some(data)
    }

    async fn fetch_timeline(&self, match_id: &str) -> Option<Value> {
        if let Some(cached) = self.caches.cached_timeline(match_id) {
            debug!(match_id, "timeline cache hit");
            return Some(cached);
        }
        let url = self.endpoint(&["api", "riot", "match", match_id, "timeline"]);
        let envelope: TimelineEnvelope = self.fetch(url, "timeline", match_id).await?;
        let timeline = envelope.timeline?;
        self.caches.store_timeline(match_id, timeline.clone());
        Some(timeline)
    }
}
