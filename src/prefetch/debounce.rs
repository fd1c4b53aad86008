//! In-flight markers with a fixed lifetime.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Marks IDs as in flight for a fixed window.
///
/// A mark lapses when its window elapses, whether or not the work it guarded
/// has finished. A fetch slower than the window can therefore be triggered a
/// second time; the window bounds how long a stuck fetch blocks a retry.
#[derive(Debug)]
pub struct DebounceWindow {
    window: Duration,
    marks: HashMap<String, Instant>,
}

impl DebounceWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            marks: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// True while `id` holds an unexpired mark.
    pub fn is_active(&self, id: &str) -> bool {
        self.marks
            .get(id)
            .is_some_and(|expires_at| Instant::now() < *expires_at)
    }

    /// Marks `id` unless it already holds an unexpired mark.
    ///
    /// Returns whether the mark was taken.
    pub fn try_acquire(&mut self, id: &str) -> bool {
        if self.is_active(id) {
            return false;
        }
        self.marks.insert(id.to_string(), Instant::now() + self.window);
        true
    }

    pub fn release(&mut self, id: &str) {
        self.marks.remove(id);
    }

    /// Drops lapsed marks, returning how many were removed.
    pub fn prune(&mut self) -> usize {
        let now = Instant::now();
        let before = self.marks.len();
        self.marks.retain(|_, expires_at| now < *expires_at);
        before - self.marks.len()
    }

    /// Number of marks held, including lapsed ones not yet pruned.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
