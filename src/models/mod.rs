//! Request and Response models
//!
//! DTOs for the HTTP API plus the vendor payload shapes (Riot, hosted
//! backend) the services deserialize.

pub mod backend;
pub mod requests;
pub mod responses;
pub mod riot;

// Re-export commonly used types
pub use backend::{AuthUser, Leaderboard, Session, Visibility};
pub use requests::{
    BannerUpload, ImageKind, MatchListQuery, OAuthCallbackQuery, OAuthStartQuery,
    RevalidateRequest, UploadedFile, ValidatedBanner, MAX_BANNER_BYTES,
};
pub use responses::{
    BannerUploadResponse, BannerUrlResponse, FlashMessage, HealthResponse, MatchEnvelope,
    MatchIdsResponse, PlayerSummaryResponse, RevalidateResponse, TimelineEnvelope,
};
pub use riot::{LeagueEntry, RiotAccount, RiotUserInfo, Summoner, TokenResponse};
