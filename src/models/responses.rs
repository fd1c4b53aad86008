//! Response DTOs for the leaderboard API
//!
//! Defines the structure of outgoing HTTP response bodies. The match
//! envelopes are also what the prefetch client deserializes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::riot::{LeagueEntry, RiotAccount, Summoner};

/// Body of `GET /api/match/:match_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchEnvelope {
    #[serde(rename = "match", default)]
    pub match_data: Option<Value>,
}

/// Body of `GET /api/riot/match/:match_id/timeline`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineEnvelope {
    #[serde(default)]
    pub timeline: Option<Value>,
}

/// Body of `GET /api/player/:puuid/matches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchIdsResponse {
    #[serde(rename = "matchIds")]
    pub match_ids: Vec<String>,
}

/// Body of `GET /api/player/:puuid/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummaryResponse {
    pub puuid: String,
    /// `Name#TAG`
    pub riot_id: Option<String>,
    pub account: Option<RiotAccount>,
    pub summoner: Option<Summoner>,
    pub ranked: Vec<LeagueEntry>,
}

/// Body of a successful `POST /api/banner/upload`.
#[derive(Debug, Clone, Serialize)]
pub struct BannerUploadResponse {
    pub ok: bool,
    pub banner_path: String,
}

impl BannerUploadResponse {
    pub fn new(banner_path: impl Into<String>) -> Self {
        Self {
            ok: true,
            banner_path: banner_path.into(),
        }
    }
}

/// Body of `GET /api/banner/:slug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerUrlResponse {
    pub url: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl BannerUrlResponse {
    pub fn empty() -> Self {
        Self {
            url: None,
            updated_at: None,
        }
    }
}

/// Body of `POST /api/internal/revalidate`.
#[derive(Debug, Clone, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: Vec<String>,
}

/// One-shot toast shown on the dashboard after sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: String,
    pub tone: String,
    pub message: String,
}

impl FlashMessage {
    pub fn success(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            tone: "success".to_string(),
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
