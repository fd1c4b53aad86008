//! Prefetch Coordinator
//!
//! Deduplicates match prefetches and exposes their results, pending or
//! settled, to every reader in the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use super::record::confirmed_match_id;
use super::{DebounceWindow, MatchSource, PrefetchRecord, SharedFetch, Slot};

/// How long a record satisfies new prefetches and survives sweeps.
pub const RECORD_TTL: Duration = Duration::from_secs(5 * 60);
/// How long a started prefetch blocks another one for the same ID.
pub const IN_FLIGHT_WINDOW: Duration = Duration::from_millis(1000);

// == Prefetch Coordinator ==
/// Shared handle to the prefetch state. Cloning is cheap.
///
/// The check-then-mark sequence in [`prefetch`](Self::prefetch) runs under a
/// single lock, so concurrent callers on any thread start at most one fetch
/// per ID within the in-flight window.
#[derive(Clone)]
pub struct PrefetchCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn MatchSource>,
    state: Mutex<State>,
    generations: AtomicU64,
    record_ttl: Duration,
}

struct State {
    records: HashMap<String, PrefetchRecord>,
    in_flight: DebounceWindow,
}

#[derive(Clone, Copy)]
enum Field {
    Match,
    Timeline,
}

impl PrefetchCoordinator {
    pub fn new(source: Arc<dyn MatchSource>) -> Self {
        Self::with_timings(source, RECORD_TTL, IN_FLIGHT_WINDOW)
    }

    pub fn with_timings(source: Arc<dyn MatchSource>, record_ttl: Duration, in_flight_window: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(State {
                    records: HashMap::new(),
                    in_flight: DebounceWindow::new(in_flight_window),
                }),
                generations: AtomicU64::new(0),
                record_ttl,
            }),
        }
    }

    // == Prefetch ==
    /// Starts fetching `match_id` and then its timeline in the background.
    ///
    /// No-op for an empty ID, for an ID still inside its in-flight window, or
    /// for an ID with a record younger than the record TTL. Returns whether a
    /// fetch was started. Must be called from within a Tokio runtime.
    ///
    /// A started prefetch runs to completion even if nobody reads it.
    pub fn prefetch(&self, match_id: &str) -> bool {
        let match_id = match_id.trim();
        if match_id.is_empty() {
            return false;
        }

        let (fetch, id) = {
            let mut state = self.inner.state.lock();

            if state.in_flight.is_active(match_id) {
                debug!(match_id, "prefetch skipped: already in flight");
                return false;
            }
            if let Some(record) = state.records.get(match_id) {
                if record.age() < self.inner.record_ttl {
                    debug!(match_id, "prefetch skipped: record still fresh");
                    return false;
                }
            }

            state.in_flight.try_acquire(match_id);
            let generation = self.inner.generations.fetch_add(1, Ordering::Relaxed);
            let id = match_id.to_string();
            let (match_fetch, timeline_fetch) = self.build_fetches(&id, generation);

            state.records.insert(
                id.clone(),
                PrefetchRecord {
                    match_id: id.clone(),
                    match_data: Slot::Pending(match_fetch),
                    timeline: Slot::Pending(timeline_fetch.clone()),
                    created_at: Instant::now(),
                    generation,
                },
            );
            (timeline_fetch, id)
        };

        debug!(match_id = %id, "prefetch started");
        // The timeline fetch awaits the match fetch, so driving it drives both
        tokio::spawn(async move {
            let _ = fetch.await;
        });
        true
    }

    /// Builds the match fetch and the timeline fetch chained behind it.
    ///
    /// Each fetch writes its own result back into the record as it settles,
    /// so a reader who awaited it sees the record already updated.
    fn build_fetches(&self, id: &str, generation: u64) -> (SharedFetch<Value>, SharedFetch<Value>) {
        let weak = Arc::downgrade(&self.inner);

        let match_fetch: SharedFetch<Value> = {
            let weak = weak.clone();
            let source = self.inner.source.clone();
            let id = id.to_string();
            async move {
                let data = source.fetch_match(&id).await;
                settle(&weak, &id, generation, Field::Match, data.clone());
                data
            }
            .boxed()
            .shared()
        };

        let timeline_fetch: SharedFetch<Value> = {
            let source = self.inner.source.clone();
            let match_fetch = match_fetch.clone();
            let id = id.to_string();
            async move {
                let timeline = match match_fetch.await {
                    Some(data) => {
                        let confirmed = confirmed_match_id(&data).unwrap_or(id.as_str()).to_string();
                        source.fetch_timeline(&confirmed).await
                    }
                    None => None,
                };
                settle(&weak, &id, generation, Field::Timeline, timeline.clone());
                timeline
            }
            .boxed()
            .shared()
        };

        (match_fetch, timeline_fetch)
    }

    // == Reads ==
    /// Current record for `match_id`. Never triggers a fetch.
    ///
    /// IDs are keyed trimmed, the same way `prefetch` stores them.
    pub fn get_prefetched_data(&self, match_id: &str) -> Option<PrefetchRecord> {
        self.inner.state.lock().records.get(match_id.trim()).cloned()
    }

    pub fn is_in_flight(&self, match_id: &str) -> bool {
        self.inner.state.lock().in_flight.is_active(match_id.trim())
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Clear ==
    /// Forgets `match_id` so the next prefetch fetches afresh.
    pub fn clear(&self, match_id: &str) {
        let match_id = match_id.trim();
        let mut state = self.inner.state.lock();
        state.records.remove(match_id);
        state.in_flight.release(match_id);
    }

    // == Sweep ==
    /// Drops records older than the record TTL and lapsed in-flight marks.
    ///
    /// Returns how many records were dropped.
    pub fn sweep(&self) -> usize {
        let ttl = self.inner.record_ttl;
        let mut state = self.inner.state.lock();
        let before = state.records.len();
        state.records.retain(|_, record| record.age() < ttl);
        state.in_flight.prune();
        before - state.records.len()
    }
}

/// Replaces a pending field with its settled value, unless the record was
/// cleared or replaced since the fetch started.
fn settle(inner: &Weak<Inner>, id: &str, generation: u64, field: Field, value: Option<Value>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut state = inner.state.lock();
    let Some(record) = state.records.get_mut(id) else {
        return;
    };
    if record.generation != generation {
        return;
    }
    match field {
        Field::Match => record.match_data = Slot::Ready(value),
        Field::Timeline => record.timeline = Slot::Ready(value),
    }
}
