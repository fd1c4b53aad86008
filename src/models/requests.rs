//! Request DTOs for the leaderboard API
//!
//! Defines the structure of incoming query strings, JSON bodies and
//! multipart forms, plus their validation.

use serde::Deserialize;

/// Largest banner image accepted, in bytes.
pub const MAX_BANNER_BYTES: usize = 4 * 1024 * 1024;

const DEFAULT_MATCH_LIMIT: u32 = 10;
const MAX_MATCH_LIMIT: u32 = 100;

/// Query for `GET /api/player/:puuid/matches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchListQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

impl MatchListQuery {
    /// Requested limit clamped to 1..=100, 10 when absent.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_MATCH_LIMIT)
            .clamp(1, MAX_MATCH_LIMIT)
    }
}

/// Body of `POST /api/internal/revalidate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevalidateRequest {
    #[serde(rename = "lbIds", default)]
    pub lb_ids: Vec<String>,
}

impl RevalidateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.lb_ids.is_empty() {
            return Some("lbIds must be a non-empty array".to_string());
        }
        if self.lb_ids.iter().any(|id| id.trim().is_empty()) {
            return Some("lbIds must not contain empty IDs".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthStartQuery {
    /// Where to land after sign-in; only same-site paths are honoured
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

// == Banner Upload ==

/// Banner image formats we store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fields collected from the banner upload form, before validation.
#[derive(Debug, Clone, Default)]
pub struct BannerUpload {
    pub leaderboard_id: Option<String>,
    pub file: Option<UploadedFile>,
}

/// A banner upload that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedBanner {
    pub leaderboard_id: String,
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl BannerUpload {
    /// Checks the form without touching auth, database or storage.
    ///
    /// A declared content type decides the format; the file name is only
    /// consulted when the part carries no content type.
    pub fn validate(self) -> Result<ValidatedBanner, String> {
        let leaderboard_id = self
            .leaderboard_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "Missing leaderboardId".to_string())?;

        let file = self.file.ok_or_else(|| "Missing file".to_string())?;

        let kind = match file.content_type.as_deref() {
            Some(content_type) => ImageKind::from_content_type(content_type),
            None => file.file_name.as_deref().and_then(ImageKind::from_file_name),
        }
        .ok_or_else(|| "Unsupported file type. Use PNG, JPG, or WEBP.".to_string())?;

        if file.bytes.is_empty() {
            return Err("File is empty".to_string());
        }
        if file.bytes.len() > MAX_BANNER_BYTES {
            return Err("File too large (max 4MB)".to_string());
        }

        Ok(ValidatedBanner {
            leaderboard_id,
            kind,
            bytes: file.bytes,
        })
    }
}
