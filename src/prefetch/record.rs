//! Prefetch records.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::Slot;

/// What is known about one prefetched match.
///
/// `match_data` and `timeline` start as `Pending` and are replaced by
/// `Ready` as their fetches settle. The timeline fetch only happens after the
/// match settles with data.
#[derive(Debug, Clone)]
pub struct PrefetchRecord {
    /// ID the caller asked for
    pub match_id: String,
    pub match_data: Slot<Value>,
    pub timeline: Slot<Value>,
    /// When the prefetch was triggered
    pub created_at: Instant,
    /// Distinguishes this record from one created after a `clear`
    pub(crate) generation: u64,
}

impl PrefetchRecord {
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.created_at)
    }

    /// True once neither field is still pending.
    pub fn is_settled(&self) -> bool {
        !self.match_data.is_pending() && !self.timeline.is_pending()
    }
}

/// The match ID as confirmed by the server in `metadata.matchId`.
///
/// It can differ in formatting from what the caller passed (e.g. case), and
/// the timeline must be fetched by the confirmed form.
pub fn confirmed_match_id(match_data: &Value) -> Option<&str> {
    match_data
        .pointer("/metadata/matchId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}
