//! Shapes returned by Riot's platform and sign-on APIs.

use serde::{Deserialize, Serialize};

/// `account-v1` account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotAccount {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

impl RiotAccount {
    /// `Name#TAG`, when both halves are known.
    pub fn riot_id(&self) -> Option<String> {
        match (&self.game_name, &self.tag_line) {
            (Some(name), Some(tag)) => Some(format!("{}#{}", name, tag)),
            _ => None,
        }
    }
}

/// `summoner-v4` summoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub puuid: String,
    pub profile_icon_id: u32,
    pub summoner_level: u64,
}

/// `league-v4` ranked entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
}

/// Token endpoint response of Riot sign-on.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Userinfo endpoint response of Riot sign-on. `sub` is the player's PUUID.
#[derive(Debug, Clone, Deserialize)]
pub struct RiotUserInfo {
    pub sub: String,
    /// Platform the account plays on, e.g. `NA1`
    #[serde(default)]
    pub cpid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_riot_id() {
        let account: RiotAccount = serde_json::from_value(json!({
            "puuid": "p", "gameName": "Faker", "tagLine": "KR1"
        }))
        .unwrap();
        assert_eq!(account.riot_id().as_deref(), Some("Faker#KR1"));

        let partial: RiotAccount = serde_json::from_value(json!({"puuid": "p"})).unwrap();
        assert_eq!(partial.riot_id(), None);
    }

    #[test]
    fn test_league_entry_camel_case() {
        let entry: LeagueEntry = serde_json::from_value(json!({
            "queueType": "RANKED_SOLO_5x5", "tier": "GOLD", "rank": "II",
            "leaguePoints": 54, "wins": 40, "losses": 38, "hotStreak": false
        }))
        .unwrap();
        assert_eq!(entry.league_points, 54);
    }
}
