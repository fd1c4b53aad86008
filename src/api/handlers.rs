//! API Handlers
//!
//! Match and player proxies over the Riot API, plus health and cache stats.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use super::state::AppState;
use crate::cache::ServerCacheStats;
use crate::error::{ApiError, Result};
use crate::models::{
    HealthResponse, MatchEnvelope, MatchIdsResponse, MatchListQuery, PlayerSummaryResponse,
    TimelineEnvelope,
};

/// Accepts `{PLATFORM}_{number}`, e.g. `NA1_4912345678`.
pub fn is_valid_match_id(match_id: &str) -> bool {
    match match_id.split_once('_') {
        Some((platform, number)) => {
            !platform.is_empty()
                && platform.chars().all(|c| c.is_ascii_alphanumeric())
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn require_match_id(match_id: &str) -> Result<()> {
    if is_valid_match_id(match_id) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid match id: {}", match_id)))
    }
}

fn require_puuid(puuid: &str) -> Result<()> {
    if puuid.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing puuid".to_string()));
    }
    Ok(())
}

/// Handler for GET /api/match/:match_id
///
/// Unknown matches answer `{"match": null}` rather than 404.
pub async fn match_handler(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchEnvelope>> {
    require_match_id(&match_id)?;

    if let Some(cached) = state.cache.cached_match(&match_id) {
        debug!(match_id = %match_id, "match served from cache");
        return Ok(Json(MatchEnvelope {
            match_data: Some(cached),
        }));
    }

    let match_data = state.riot.match_by_id(&match_id).await?;
    if let Some(value) = &match_data {
        state.cache.store_match(&match_id, value.clone());
    }
    Ok(Json(MatchEnvelope { match_data }))
}

/// Handler for GET /api/riot/match/:match_id/timeline
pub async fn timeline_handler(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<TimelineEnvelope>> {
    require_match_id(&match_id)?;

    if let Some(cached) = state.cache.cached_timeline(&match_id) {
        return Ok(Json(TimelineEnvelope {
            timeline: Some(cached),
        }));
    }

    let timeline = state.riot.match_timeline(&match_id).await?;
    if let Some(value) = &timeline {
        state.cache.store_timeline(&match_id, value.clone());
    }
    Ok(Json(TimelineEnvelope { timeline }))
}

/// Handler for GET /api/player/:puuid/summary
///
/// Account, summoner and ranked entries are fetched concurrently.
pub async fn player_summary_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
) -> Result<Json<PlayerSummaryResponse>> {
    require_puuid(&puuid)?;

    let (account, summoner, ranked) = tokio::join!(
        state.riot.account_by_puuid(&puuid),
        state.riot.summoner_by_puuid(&puuid),
        state.riot.league_entries_by_puuid(&puuid),
    );
    let (account, summoner, ranked) = (account?, summoner?, ranked?);

    if account.is_none() && summoner.is_none() {
        return Err(ApiError::NotFound("Player not found".to_string()));
    }

    Ok(Json(PlayerSummaryResponse {
        riot_id: account.as_ref().and_then(|a| a.riot_id()),
        puuid,
        account,
        summoner,
        ranked,
    }))
}

/// Handler for GET /api/player/:puuid/matches
pub async fn player_matches_handler(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<MatchIdsResponse>> {
    require_puuid(&puuid)?;

    let match_ids = state
        .riot
        .match_ids_by_puuid(&puuid, query.effective_limit())
        .await?;
    Ok(Json(MatchIdsResponse { match_ids }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ServerCacheStats> {
    Json(state.cache.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_validation() {
        assert!(is_valid_match_id("NA1_4912345678"));
        assert!(is_valid_match_id("euw1_1"));
        assert!(!is_valid_match_id("NA1_"));
        assert!(!is_valid_match_id("_123"));
        assert!(!is_valid_match_id("NA1-123"));
        assert!(!is_valid_match_id("NA1_12a"));
        assert!(!is_valid_match_id("../etc_1"));
    }

    #[test]
    fn test_invalid_match_id_is_bad_request() {
        let err = require_match_id("nope").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "healthy");
    }
}
