//! Cookie and credential helpers for the route handlers.

use axum::http::{header, HeaderMap};
use url::form_urlencoded;

pub const OAUTH_STATE_COOKIE: &str = "riot_oauth_state";
pub const OAUTH_NEXT_COOKIE: &str = "riot_oauth_next";
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const FLASH_COOKIE: &str = "dashboard_flash";

/// Attributes of a `Set-Cookie` header. Always `Path=/; SameSite=Lax`.
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age_secs: i64,
    pub http_only: bool,
    pub secure: bool,
}

impl CookieOptions {
    pub fn http_only(max_age_secs: i64, secure: bool) -> Self {
        Self {
            max_age_secs,
            http_only: true,
            secure,
        }
    }

    /// Readable from page scripts.
    pub fn script_visible(max_age_secs: i64, secure: bool) -> Self {
        Self {
            max_age_secs,
            http_only: false,
            secure,
        }
    }
}

/// Formats a `Set-Cookie` value. `value` is percent-encoded.
pub fn set_cookie(name: &str, value: &str, options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        encode_value(value),
        options.max_age_secs.max(0)
    );
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Expires `name` immediately.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", CookieOptions::http_only(0, secure))
}

pub fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub fn decode_value(raw: &str) -> String {
    form_urlencoded::parse(format!("v={}", raw).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Reads and decodes the first cookie named `name` across all `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_value(value))
        .filter(|value| !value.is_empty())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Session token from `Authorization: Bearer`, else the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| read_cookie(headers, ACCESS_TOKEN_COOKIE))
}

/// Same-site path safe to redirect to after sign-in.
pub fn safe_next_path(next: &str) -> Option<&str> {
    let next = next.trim();
    let safe = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control);
    safe.then_some(next)
}
