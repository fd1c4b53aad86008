//! API Module
//!
//! HTTP handlers and routing for the leaderboard backend.
//!
//! # Endpoints
//! - Match and player proxies over the Riot API (`handlers`)
//! - Banner upload and signed-URL lookup (`banner`)
//! - Riot sign-on start/callback (`auth`)
//! - Cache revalidation webhook (`internal`)

pub mod auth;
pub mod banner;
pub mod cookies;
pub mod handlers;
pub mod internal;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, Services};
