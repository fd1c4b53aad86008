//! In-memory stand-ins for the vendor services, plus request helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use riftboard::models::{
    AuthUser, LeagueEntry, Leaderboard, RiotAccount, RiotUserInfo, Session, Summoner,
    TokenResponse, Visibility,
};
use riftboard::services::{AuthProvider, LeaderboardStore, ObjectStorage, RiotApi, RiotOAuth};
use riftboard::{create_router, AppState, Config, Services, UpstreamError};

pub const OWNER_TOKEN: &str = "owner-token";
pub const OWNER_ID: &str = "owner-1";
pub const OTHER_TOKEN: &str = "other-token";
pub const OTHER_ID: &str = "other-1";
pub const INTERNAL_SECRET: &str = "s3cret";
pub const BOUNDARY: &str = "riftboard-test-boundary";

// == Riot ==

#[derive(Default)]
pub struct FakeRiot {
    pub matches: Mutex<HashMap<String, Value>>,
    pub timelines: Mutex<HashMap<String, Value>>,
    pub accounts: Mutex<HashMap<String, RiotAccount>>,
    pub summoners: Mutex<HashMap<String, Summoner>>,
    pub match_ids: Mutex<Vec<String>>,
    pub last_count: Mutex<Option<u32>>,
    pub match_calls: AtomicUsize,
}

impl FakeRiot {
    pub fn match_calls(&self) -> usize {
        self.match_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RiotApi for FakeRiot {
    async fn match_by_id(&self, match_id: &str) -> Result<Option<Value>, UpstreamError> {
        self.match_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.matches.lock().get(match_id).cloned())
    }

    async fn match_timeline(&self, match_id: &str) -> Result<Option<Value>, UpstreamError> {
        Ok(self.timelines.lock().get(match_id).cloned())
    }

    async fn match_ids_by_puuid(&self, _puuid: &str, count: u32) -> Result<Vec<String>, UpstreamError> {
        *self.last_count.lock() = Some(count);
        Ok(self.match_ids.lock().iter().take(count as usize).cloned().collect())
    }

    async fn account_by_puuid(&self, puuid: &str) -> Result<Option<RiotAccount>, UpstreamError> {
        Ok(self.accounts.lock().get(puuid).cloned())
    }

    async fn summoner_by_puuid(&self, puuid: &str) -> Result<Option<Summoner>, UpstreamError> {
        Ok(self.summoners.lock().get(puuid).cloned())
    }

    async fn league_entries_by_puuid(&self, _puuid: &str) -> Result<Vec<LeagueEntry>, UpstreamError> {
        Ok(Vec::new())
    }
}

// == Riot sign-on ==

pub struct FakeOAuth {
    pub valid_code: String,
    pub puuid: String,
}

impl Default for FakeOAuth {
    fn default() -> Self {
        Self {
            valid_code: "good-code".to_string(),
            puuid: "puuid-1".to_string(),
        }
    }
}

#[async_trait]
impl RiotOAuth for FakeOAuth {
    fn authorize_url(&self, state: &str) -> Result<String, UpstreamError> {
        Ok(format!("https://auth.test/authorize?client_id=c&state={}", state))
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, UpstreamError> {
        if code != self.valid_code {
            return Err(UpstreamError::Status {
                status: 400,
                body: "invalid_grant".to_string(),
            });
        }
        Ok(TokenResponse {
            access_token: "riot-access".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
            refresh_token: None,
            id_token: None,
        })
    }

    async fn userinfo(&self, _access_token: &str) -> Result<RiotUserInfo, UpstreamError> {
        Ok(RiotUserInfo {
            sub: self.puuid.clone(),
            cpid: Some("NA1".to_string()),
        })
    }

    async fn account_me(&self, _access_token: &str) -> Result<Option<RiotAccount>, UpstreamError> {
        Ok(Some(RiotAccount {
            puuid: self.puuid.clone(),
            game_name: Some("Faker".to_string()),
            tag_line: Some("KR1".to_string()),
        }))
    }
}

// == Auth ==

#[derive(Default)]
pub struct FakeAuth {
    pub tokens: Mutex<HashMap<String, AuthUser>>,
    pub ensured: Mutex<Vec<(String, Value)>>,
    pub calls: AtomicUsize,
}

impl FakeAuth {
    pub fn with_users() -> Self {
        let auth = Self::default();
        for (token, id) in [(OWNER_TOKEN, OWNER_ID), (OTHER_TOKEN, OTHER_ID)] {
            auth.tokens.lock().insert(
                token.to_string(),
                AuthUser {
                    id: id.to_string(),
                    email: None,
                },
            );
        }
        auth
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.lock().get(access_token).cloned())
    }

    async fn ensure_user(&self, email: &str, metadata: Value) -> Result<bool, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut ensured = self.ensured.lock();
        let created = !ensured.iter().any(|(e, _)| e == email);
        ensured.push((email.to_string(), metadata));
        Ok(created)
    }

    async fn generate_magic_link(&self, email: &str) -> Result<String, UpstreamError> {
        Ok(format!("hash-{}", email))
    }

    async fn verify_magic_link(&self, token_hash: &str) -> Result<Session, UpstreamError> {
        if !token_hash.starts_with("hash-") {
            return Err(UpstreamError::Status {
                status: 403,
                body: "token expired".to_string(),
            });
        }
        Ok(Session {
            access_token: "session-access".to_string(),
            refresh_token: "session-refresh".to_string(),
            expires_in: 3600,
            user: None,
        })
    }
}

// == Leaderboards ==

#[derive(Default)]
pub struct FakeLeaderboards {
    pub rows: Mutex<HashMap<String, Leaderboard>>,
    pub calls: AtomicUsize,
    pub lookups: AtomicUsize,
}

impl FakeLeaderboards {
    pub fn insert(&self, id: &str, slug: &str, owner: &str, visibility: Visibility, banner_path: Option<&str>) {
        self.rows.lock().insert(
            id.to_string(),
            Leaderboard {
                id: id.to_string(),
                slug: slug.to_string(),
                user_id: owner.to_string(),
                visibility,
                banner_path: banner_path.map(str::to_string),
                banner_updated_at: banner_path
                    .map(|_| "2024-02-01T10:00:00Z".parse().unwrap_or_else(|_| Utc::now())),
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<Leaderboard> {
        self.rows.lock().get(id).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaderboardStore for FakeLeaderboards {
    async fn leaderboard_by_id(&self, id: &str) -> Result<Option<Leaderboard>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(id))
    }

    async fn leaderboard_by_slug(&self, slug: &str) -> Result<Option<Leaderboard>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().values().find(|lb| lb.slug == slug).cloned())
    }

    async fn set_banner(&self, id: &str, path: &str, updated_at: DateTime<Utc>) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(row) = self.rows.lock().get_mut(id) {
            row.banner_path = Some(path.to_string());
            row.banner_updated_at = Some(updated_at);
        }
        Ok(())
    }
}

// == Storage ==

#[derive(Default)]
pub struct FakeStorage {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub calls: AtomicUsize,
    pub fail_uploads: AtomicBool,
}

impl FakeStorage {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                status: 503,
                body: "storage unavailable".to_string(),
            });
        }
        self.objects
            .lock()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://storage.test/{}?expires={}",
            path,
            expires_in.as_secs()
        ))
    }
}

// == Harness ==

pub struct Harness {
    pub app: Router,
    pub state: AppState,
    pub riot: Arc<FakeRiot>,
    pub oauth: Arc<FakeOAuth>,
    pub auth: Arc<FakeAuth>,
    pub leaderboards: Arc<FakeLeaderboards>,
    pub storage: Arc<FakeStorage>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config {
            internal_secret: INTERNAL_SECRET.to_string(),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let riot = Arc::new(FakeRiot::default());
        let oauth = Arc::new(FakeOAuth::default());
        let auth = Arc::new(FakeAuth::with_users());
        let leaderboards = Arc::new(FakeLeaderboards::default());
        let storage = Arc::new(FakeStorage::default());

        let services = Services {
            riot: riot.clone(),
            oauth: oauth.clone(),
            auth: auth.clone(),
            leaderboards: leaderboards.clone(),
            storage: storage.clone(),
        };
        let state = AppState::new(config, services);

        Self {
            app: create_router(state.clone()),
            state,
            riot,
            oauth,
            auth,
            leaderboards,
            storage,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A part of a multipart form: `(name, file_name, content_type, bytes)`.
pub type Part<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", name);
        if let Some(file_name) = file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/banner/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn cookie_value(cookies: &[String], name: &str) -> Option<String> {
    cookies.iter().find_map(|cookie| {
        let (pair, _) = cookie.split_once(';').unwrap_or((cookie.as_str(), ""));
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

pub fn location(response: &Response) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}
