//! Machine-triggered endpoints. Always answer JSON.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use super::state::AppState;
use crate::cache::leaderboard_tag;
use crate::error::{ApiError, Result};
use crate::models::{RevalidateRequest, RevalidateResponse};

pub const SECRET_HEADER: &str = "x-internal-secret";

/// Constant-time comparison of the presented secret.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    given.ct_eq(expected).into()
}

/// An unset secret rejects every caller.
fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    let expected = state.config.internal_secret.as_bytes();
    if expected.is_empty() {
        return false;
    }
    headers
        .get(SECRET_HEADER)
        .is_some_and(|given| secrets_match(given.as_bytes(), expected))
}

/// Handler for POST /api/internal/revalidate
///
/// The secret is checked before the body is parsed.
pub async fn revalidate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RevalidateResponse>> {
    if !authorized(&state, &headers) {
        warn!("revalidate rejected: bad or missing secret");
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }

    let request: RevalidateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    if let Some(message) = request.validate() {
        return Err(ApiError::BadRequest(message));
    }

    let mut revalidated = Vec::with_capacity(request.lb_ids.len());
    for id in request.lb_ids {
        let id = id.trim().to_string();
        let dropped = state.cache.invalidate_tag(&leaderboard_tag(&id));
        info!(leaderboard_id = %id, dropped, "leaderboard revalidated");
        revalidated.push(id);
    }

    Ok(Json(RevalidateResponse { revalidated }))
}
