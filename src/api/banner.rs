//! Banner upload and lookup.

use std::time::Duration;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use super::cookies::session_token;
use super::state::AppState;
use crate::error::{ApiError, Result};
use crate::models::{
    AuthUser, BannerUpload, BannerUploadResponse, BannerUrlResponse, ImageKind, Leaderboard,
    UploadedFile, Visibility,
};

/// How long a signed banner URL stays valid.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

pub const PUBLIC_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=600";
pub const PRIVATE_CACHE_CONTROL: &str = "private, no-store";

/// Storage path of a leaderboard's banner, namespaced by owner.
pub fn banner_object_path(owner_id: &str, leaderboard_id: &str, kind: ImageKind) -> String {
    format!("{}/{}/banner.{}", owner_id, leaderboard_id, kind.extension())
}

fn cache_control(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Private => PRIVATE_CACHE_CONTROL,
        Visibility::Public | Visibility::Unlisted => PUBLIC_CACHE_CONTROL,
    }
}

/// Collects the `leaderboardId` and `file` parts; anything else is ignored.
async fn read_banner_form(mut multipart: Multipart) -> Result<BannerUpload> {
    let mut form = BannerUpload::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("leaderboardId") => {
                form.leaderboard_id = Some(field.text().await?);
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn signed_in_user(state: &AppState, headers: &HeaderMap) -> Result<AuthUser> {
    let token = session_token(headers).ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))?;
    state
        .auth
        .user_from_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid session".to_string()))
}

/// Best-effort viewer identity; an unusable session reads as anonymous.
async fn viewer_id(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    match state.auth.user_from_token(&token).await {
        Ok(user) => user.map(|u| u.id),
        Err(err) => {
            warn!(error = %err, "session lookup failed; treating viewer as anonymous");
            None
        }
    }
}

/// Handler for POST /api/banner/upload
///
/// The form is validated before any auth, database or storage call.
pub async fn upload_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<BannerUploadResponse>> {
    let banner = read_banner_form(multipart)
        .await?
        .validate()
        .map_err(ApiError::BadRequest)?;

    let user = signed_in_user(&state, &headers).await?;

    let leaderboard = state
        .leaderboards
        .leaderboard_by_id(&banner.leaderboard_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Leaderboard not found".to_string()))?;
    if !leaderboard.is_owned_by(&user.id) {
        return Err(ApiError::Forbidden("Not your leaderboard".to_string()));
    }

    let path = banner_object_path(&user.id, &leaderboard.id, banner.kind);
    state
        .storage
        .upload(&path, banner.bytes, banner.kind.mime())
        .await?;
    state
        .leaderboards
        .set_banner(&leaderboard.id, &path, Utc::now())
        .await?;
    state.cache.invalidate_leaderboard(&leaderboard.id);

    info!(leaderboard_id = %leaderboard.id, path = %path, "banner updated");
    Ok(Json(BannerUploadResponse::new(path)))
}

/// Handler for GET /api/banner/:slug
///
/// Private leaderboards answer 404 `{url: null}` to anyone but the owner.
pub async fn get_banner_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    if let Some(cached) = state.cache.cached_banner(&slug) {
        return Ok(banner_response(StatusCode::OK, cached, PUBLIC_CACHE_CONTROL));
    }

    let Some(leaderboard) = state.leaderboards.leaderboard_by_slug(&slug).await? else {
        return Ok(not_found());
    };

    if leaderboard.visibility == Visibility::Private {
        let viewer = viewer_id(&state, &headers).await;
        if !leaderboard.visible_to(viewer.as_deref()) {
            return Ok(not_found());
        }
    }

    let body = resolve_banner(&state, &leaderboard).await?;
    if leaderboard.visibility != Visibility::Private {
        state.cache.store_banner(&slug, &leaderboard.id, body.clone());
    }

    Ok(banner_response(StatusCode::OK, body, cache_control(leaderboard.visibility)))
}

async fn resolve_banner(state: &AppState, leaderboard: &Leaderboard) -> Result<BannerUrlResponse> {
    let Some(path) = leaderboard.banner_path.as_deref() else {
        return Ok(BannerUrlResponse::empty());
    };
    let url = state.storage.signed_url(path, SIGNED_URL_TTL).await?;
    Ok(BannerUrlResponse {
        url: Some(url),
        updated_at: leaderboard.banner_updated_at.map(|at| at.to_rfc3339()),
    })
}

fn not_found() -> Response {
    banner_response(StatusCode::NOT_FOUND, BannerUrlResponse::empty(), PRIVATE_CACHE_CONTROL)
}

fn banner_response(status: StatusCode, body: BannerUrlResponse, cache_control: &'static str) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, HeaderValue::from_static(cache_control))],
        Json(body),
    )
        .into_response()
}
