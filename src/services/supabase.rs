//! Hosted backend client: Auth admin API, the REST view of the
//! `leaderboards` table, and the banner storage bucket.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{AuthProvider, LeaderboardStore, ObjectStorage};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{AuthUser, Leaderboard, Session};

const LEADERBOARD_COLUMNS: &str = "id,slug,user_id,visibility,banner_path,banner_updated_at";

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
    bucket: String,
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

impl SupabaseClient {
    pub fn from_config(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
            bucket: config.banner_bucket.clone(),
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        if self.base_url.is_empty() {
            return Err(UpstreamError::Config("SUPABASE_URL".to_string()));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::Config(format!("invalid SUPABASE_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Config("SUPABASE_URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Object path split into segments so each part is escaped on its own.
    fn object_url(&self, prefix: &[&str], path: &str) -> Result<Url, UpstreamError> {
        let mut segments = prefix.to_vec();
        segments.push(&self.bucket);
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        self.url(&segments)
    }

    /// Request authorized with the service role key.
    fn admin(&self, request: RequestBuilder) -> Result<RequestBuilder, UpstreamError> {
        if self.service_role_key.is_empty() {
            return Err(UpstreamError::Config("SUPABASE_SERVICE_ROLE_KEY".to_string()));
        }
        Ok(request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key))
    }

    async fn leaderboard_where(&self, column: &str, value: &str) -> Result<Option<Leaderboard>, UpstreamError> {
        let mut url = self.url(&["rest", "v1", "leaderboards"])?;
        url.query_pairs_mut()
            .append_pair(column, &format!("eq.{}", value))
            .append_pair("select", LEADERBOARD_COLUMNS)
            .append_pair("limit", "1");

        let response = self.admin(self.http.get(url))?.send().await?;
        let rows: Vec<Leaderboard> = decode(ensure_success(response).await?).await?;
        Ok(rows.into_iter().next())
    }
}

async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::Decode(e.to_string()))
}

/// `hashed_token` sits at the top level or under `properties` depending on API version.
fn hashed_token(body: &Value) -> Option<&str> {
    body.get("hashed_token")
        .or_else(|| body.pointer("/properties/hashed_token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn user_from_token(&self, access_token: &str) -> Result<Option<AuthUser>, UpstreamError> {
        if self.anon_key.is_empty() {
            return Err(UpstreamError::Config("SUPABASE_ANON_KEY".to_string()));
        }
        let response = self
            .http
            .get(self.url(&["auth", "v1", "user"])?)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        decode(ensure_success(response).await?).await.map(Some)
    }

    async fn ensure_user(&self, email: &str, metadata: Value) -> Result<bool, UpstreamError> {
        let body = json!({
            "email": email,
            "email_confirm": true,
            "user_metadata": metadata,
        });
        let request = self.http.post(self.url(&["auth", "v1", "admin", "users"])?).json(&body);
        let response = self.admin(request)?.send().await?;

        // Already registered
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            debug!(email, "auth user already exists");
            return Ok(false);
        }
        ensure_success(response).await?;
        Ok(true)
    }

    async fn generate_magic_link(&self, email: &str) -> Result<String, UpstreamError> {
        let request = self
            .http
            .post(self.url(&["auth", "v1", "admin", "generate_link"])?)
            .json(&json!({"type": "magiclink", "email": email}));
        let response = self.admin(request)?.send().await?;
        let body: Value = decode(ensure_success(response).await?).await?;

        hashed_token(&body)
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::Decode("magic link response has no hashed_token".to_string()))
    }

    async fn verify_magic_link(&self, token_hash: &str) -> Result<Session, UpstreamError> {
        if self.anon_key.is_empty() {
            return Err(UpstreamError::Config("SUPABASE_ANON_KEY".to_string()));
        }
        let response = self
            .http
            .post(self.url(&["auth", "v1", "verify"])?)
            .header("apikey", &self.anon_key)
            .json(&json!({"type": "magiclink", "token_hash": token_hash}))
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }
}

#[async_trait]
impl LeaderboardStore for SupabaseClient {
    async fn leaderboard_by_id(&self, id: &str) -> Result<Option<Leaderboard>, UpstreamError> {
        self.leaderboard_where("id", id).await
    }

    async fn leaderboard_by_slug(&self, slug: &str) -> Result<Option<Leaderboard>, UpstreamError> {
        self.leaderboard_where("slug", slug).await
    }

    async fn set_banner(&self, id: &str, path: &str, updated_at: DateTime<Utc>) -> Result<(), UpstreamError> {
        let mut url = self.url(&["rest", "v1", "leaderboards"])?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));

        let request = self
            .http
            .patch(url)
            .header("Prefer", "return=minimal")
            .json(&json!({
                "banner_path": path,
                "banner_updated_at": updated_at.to_rfc3339(),
            }));
        ensure_success(self.admin(request)?.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), UpstreamError> {
        let url = self.object_url(&["storage", "v1", "object"], path)?;
        let request = self
            .http
            .post(url)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        ensure_success(self.admin(request)?.send().await?).await?;
        debug!(path, "banner object stored");
        Ok(())
    }

    async fn signed_url(&self, path: &str, expires_in: Duration) -> Result<String, UpstreamError> {
        let url = self.object_url(&["storage", "v1", "object", "sign"], path)?;
        let request = self
            .http
            .post(url)
            .json(&json!({"expiresIn": expires_in.as_secs()}));
        let response = self.admin(request)?.send().await?;
        let signed: SignedUrlResponse = decode(ensure_success(response).await?).await?;

        // Returned path is relative to /storage/v1
        if signed.signed_url.starts_with("http") {
            return Ok(signed.signed_url);
        }
        Ok(format!("{}/storage/v1{}", self.base_url, signed.signed_url))
    }
}
