//! Shapes returned by the hosted Auth and Postgres APIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who can see a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
}

/// A row of the `leaderboards` table, limited to the columns we use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub id: String,
    pub slug: String,
    /// Owning user's ID
    pub user_id: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub banner_path: Option<String>,
    #[serde(default)]
    pub banner_updated_at: Option<DateTime<Utc>>,
}

impl Leaderboard {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Whether `viewer` may see this leaderboard's assets.
    pub fn visible_to(&self, viewer: Option<&str>) -> bool {
        match self.visibility {
            Visibility::Public | Visibility::Unlisted => true,
            Visibility::Private => viewer.is_some_and(|id| self.is_owned_by(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens minted by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaderboard(visibility: Visibility) -> Leaderboard {
        Leaderboard {
            id: "lb-1".into(),
            slug: "club".into(),
            user_id: "owner".into(),
            visibility,
            banner_path: None,
            banner_updated_at: None,
        }
    }

    #[test]
    fn test_visibility_wire_format() {
        let row: Leaderboard = serde_json::from_value(json!({
            "id": "lb-1", "slug": "club", "user_id": "u1", "visibility": "PRIVATE",
            "banner_path": "u1/lb-1/banner.png", "banner_updated_at": "2024-02-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.visibility, Visibility::Private);
        assert_eq!(row.banner_path.as_deref(), Some("u1/lb-1/banner.png"));
        assert!(row.banner_updated_at.is_some());
    }

    #[test]
    fn test_private_visible_only_to_owner() {
        let lb = leaderboard(Visibility::Private);
        assert!(lb.visible_to(Some("owner")));
        assert!(!lb.visible_to(Some("someone-else")));
        assert!(!lb.visible_to(None));
    }

    #[test]
    fn test_public_and_unlisted_visible_to_anyone() {
        assert!(leaderboard(Visibility::Public).visible_to(None));
        assert!(leaderboard(Visibility::Unlisted).visible_to(Some("x")));
    }
}
