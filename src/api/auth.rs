//! Riot sign-on bridged onto a hosted-auth session.
//!
//! `start` sets a CSRF state cookie and sends the browser to Riot. `callback`
//! checks the state, exchanges the code, makes sure a backend user exists for
//! the player, and mints a session through a server-side magic link. Every
//! failure lands on the sign-in page with the reason in `?error=`.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::cookies::{
    clear_cookie, encode_value, read_cookie, safe_next_path, set_cookie, CookieOptions,
    ACCESS_TOKEN_COOKIE, FLASH_COOKIE, OAUTH_NEXT_COOKIE, OAUTH_STATE_COOKIE, REFRESH_TOKEN_COOKIE,
};
use super::state::AppState;
use crate::error::ApiError;
use crate::models::{FlashMessage, OAuthCallbackQuery, OAuthStartQuery, RiotAccount, Session};

pub const STATE_COOKIE_MAX_AGE: i64 = 10 * 60;
pub const FLASH_MAX_AGE: i64 = 120;
pub const REFRESH_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 30;
pub const DEFAULT_LANDING: &str = "/dashboard";
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Backend identity for a Riot player.
pub fn synthesized_email(puuid: &str) -> String {
    format!("{}@riot.riftboard.local", puuid)
}

fn app_url(state: &AppState, path: &str) -> String {
    format!("{}{}", state.config.app_base_url.trim_end_matches('/'), path)
}

fn sign_in_error_url(state: &AppState, message: &str) -> String {
    app_url(state, &format!("{}?error={}", SIGN_IN_PATH, encode_value(message)))
}

fn redirect_with_cookies(location: &str, cookies: Vec<String>) -> Response {
    let headers: Vec<_> = cookies.into_iter().map(|c| (header::SET_COOKIE, c)).collect();
    (AppendHeaders(headers), Redirect::to(location)).into_response()
}

/// Handler for GET /api/auth/riot/start
pub async fn riot_start_handler(
    State(state): State<AppState>,
    Query(query): Query<OAuthStartQuery>,
) -> Response {
    let secure = state.config.secure_cookies();
    let csrf = Uuid::new_v4().simple().to_string();

    let authorize_url = match state.oauth.authorize_url(&csrf) {
        Ok(url) => url,
        Err(err) => {
            warn!(error = %err, "riot sign-on unavailable");
            return Redirect::to(&sign_in_error_url(&state, "Riot sign-in is not configured")).into_response();
        }
    };

    let mut cookies = vec![set_cookie(
        OAUTH_STATE_COOKIE,
        &csrf,
        CookieOptions::http_only(STATE_COOKIE_MAX_AGE, secure),
    )];
    match query.next.as_deref().and_then(safe_next_path) {
        Some(next) => cookies.push(set_cookie(
            OAUTH_NEXT_COOKIE,
            next,
            CookieOptions::http_only(STATE_COOKIE_MAX_AGE, secure),
        )),
        None => cookies.push(clear_cookie(OAUTH_NEXT_COOKIE, secure)),
    }

    redirect_with_cookies(&authorize_url, cookies)
}

struct SignedIn {
    session: Session,
    account: Option<RiotAccount>,
}

async fn complete_sign_in(
    state: &AppState,
    query: &OAuthCallbackQuery,
    headers: &HeaderMap,
) -> Result<SignedIn, ApiError> {
    if let Some(error) = &query.error {
        let reason = query.error_description.as_deref().unwrap_or(error);
        return Err(ApiError::BadRequest(format!("Riot sign-in failed: {}", reason)));
    }

    let expected = read_cookie(headers, OAUTH_STATE_COOKIE);
    match (expected.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(given)) if expected == given => {}
        _ => return Err(ApiError::BadRequest("Invalid OAuth state".to_string())),
    }

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing authorization code".to_string()))?;

    let tokens = state.oauth.exchange_code(code).await?;
    let userinfo = state.oauth.userinfo(&tokens.access_token).await?;
    let account = match state.oauth.account_me(&tokens.access_token).await {
        Ok(account) => account,
        Err(err) => {
            warn!(error = %err, "riot account lookup failed; continuing without riot id");
            None
        }
    };

    let email = synthesized_email(&userinfo.sub);
    let metadata = json!({
        "provider": "riot",
        "riot_puuid": userinfo.sub,
        "riot_id": account.as_ref().and_then(|a| a.riot_id()),
        "riot_platform": userinfo.cpid,
    });
    if state.auth.ensure_user(&email, metadata).await? {
        info!(puuid = %userinfo.sub, "created backend user for riot player");
    }

    let token_hash = state.auth.generate_magic_link(&email).await?;
    let session = state.auth.verify_magic_link(&token_hash).await?;

    Ok(SignedIn { session, account })
}

/// Handler for GET /api/auth/riot/callback
pub async fn riot_callback_handler(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
    headers: HeaderMap,
) -> Response {
    let secure = state.config.secure_cookies();
    let clear_handshake = vec![
        clear_cookie(OAUTH_STATE_COOKIE, secure),
        clear_cookie(OAUTH_NEXT_COOKIE, secure),
    ];

    let signed_in = match complete_sign_in(&state, &query, &headers).await {
        Ok(signed_in) => signed_in,
        Err(err) => {
            warn!(error = %err, "riot sign-in failed");
            return redirect_with_cookies(&sign_in_error_url(&state, &err.to_string()), clear_handshake);
        }
    };

    let message = match signed_in.account.as_ref().and_then(|a| a.riot_id()) {
        Some(riot_id) => format!("Signed in as {}", riot_id),
        None => "Signed in with Riot".to_string(),
    };
    let flash = FlashMessage::success("riot_signed_in", message);
    // FlashMessage only holds strings
    let flash_json = serde_json::to_string(&flash).unwrap_or_default();

    let session = &signed_in.session;
    let mut cookies = clear_handshake;
    cookies.push(set_cookie(
        ACCESS_TOKEN_COOKIE,
        &session.access_token,
        CookieOptions::http_only(session.expires_in, secure),
    ));
    cookies.push(set_cookie(
        REFRESH_TOKEN_COOKIE,
        &session.refresh_token,
        CookieOptions::http_only(REFRESH_COOKIE_MAX_AGE, secure),
    ));
    cookies.push(set_cookie(
        FLASH_COOKIE,
        &flash_json,
        CookieOptions::script_visible(FLASH_MAX_AGE, secure),
    ));

    let landing = read_cookie(&headers, OAUTH_NEXT_COOKIE)
        .as_deref()
        .and_then(safe_next_path)
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_LANDING.to_string());

    redirect_with_cookies(&app_url(&state, &landing), cookies)
}
