//! API Routes
//!
//! Configures the Axum router with all leaderboard endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{riot_callback_handler, riot_start_handler};
use super::banner::{get_banner_handler, upload_banner_handler};
use super::handlers::{
    health_handler, match_handler, player_matches_handler, player_summary_handler, stats_handler,
    timeline_handler,
};
use super::internal::revalidate_handler;
use super::state::AppState;
use crate::models::MAX_BANNER_BYTES;

/// Room for the multipart framing and the `leaderboardId` field.
const UPLOAD_BODY_LIMIT: usize = MAX_BANNER_BYTES + 64 * 1024;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health`, `GET /stats`
/// - `GET /api/match/:match_id`, `GET /api/riot/match/:match_id/timeline`
/// - `GET /api/player/:puuid/summary`, `GET /api/player/:puuid/matches`
/// - `POST /api/banner/upload`, `GET /api/banner/:slug`
/// - `GET /api/auth/riot/start`, `GET /api/auth/riot/callback`
/// - `POST /api/internal/revalidate`
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/match/:match_id", get(match_handler))
        .route("/riot/match/:match_id/timeline", get(timeline_handler))
        .route("/player/:puuid/summary", get(player_summary_handler))
        .route("/player/:puuid/matches", get(player_matches_handler))
        .route(
            "/banner/upload",
            post(upload_banner_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/banner/:slug", get(get_banner_handler))
        .route("/auth/riot/start", get(riot_start_handler))
        .route("/auth/riot/callback", get(riot_callback_handler))
        .route("/internal/revalidate", post(revalidate_handler))
}
