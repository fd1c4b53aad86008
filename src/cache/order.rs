//! Insertion Order Module
//!
//! Tracks the order in which keys were first inserted, for FIFO capacity eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks insertion order for capacity eviction.
///
/// Not an LRU: neither reads nor rewrites reorder keys.
/// - Front = oldest insert
/// - Back = newest insert
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Insert ==
    /// Appends a newly inserted key as the newest.
    ///
    /// Callers record a key once; rewriting a tracked key keeps its slot.
    pub fn record_insert(&mut self, key: &str) {
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest-inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    /// Returns the oldest-inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Keys from oldest to newest insert.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}
