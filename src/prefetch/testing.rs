//! In-memory match source for prefetch tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;

use super::MatchSource;

/// Serves canned responses and counts calls per ID.
///
/// `hold` makes fetches block after reading their response until `release`.
pub struct FakeSource {
    matches: Mutex<HashMap<String, Value>>,
    timelines: Mutex<HashMap<String, Value>>,
    match_calls: Mutex<HashMap<String, usize>>,
    timeline_calls: Mutex<HashMap<String, usize>>,
    gate: watch::Sender<bool>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        let (gate, _) = watch::channel(true);
        Arc::new(Self {
            matches: Mutex::new(HashMap::new()),
            timelines: Mutex::new(HashMap::new()),
            match_calls: Mutex::new(HashMap::new()),
            timeline_calls: Mutex::new(HashMap::new()),
            gate,
        })
    }

    pub fn set_match(&self, id: &str, value: Value) {
        self.matches.lock().insert(id.to_string(), value);
    }

    pub fn set_timeline(&self, id: &str, value: Value) {
        self.timelines.lock().insert(id.to_string(), value);
    }

    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    pub fn match_calls(&self, id: &str) -> usize {
        self.match_calls.lock().get(id).copied().unwrap_or(0)
    }

    pub fn timeline_calls(&self, id: &str) -> usize {
        self.timeline_calls.lock().get(id).copied().unwrap_or(0)
    }

    pub fn total_match_calls(&self) -> usize {
        self.match_calls.lock().values().sum()
    }

    pub fn total_timeline_calls(&self) -> usize {
        self.timeline_calls.lock().values().sum()
    }

    async fn wait_for_gate(&self) {
        let mut rx = self.gate.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

#[async_trait]
impl MatchSource for FakeSource {
    async fn fetch_match(&self, match_id: &str) -> Option<Value> {
        *self.match_calls.lock().entry(match_id.to_string()).or_default() += 1;
        let response = self.matches.lock().get(match_id).cloned();
        self.wait_for_gate().await;
        response
    }

    async fn fetch_timeline(&self, match_id: &str) -> Option<Value> {
        *self.timeline_calls.lock().entry(match_id.to_string()).or_default() += 1;
        let response = self.timelines.lock().get(match_id).cloned();
        self.wait_for_gate().await;
        response
    }
}
