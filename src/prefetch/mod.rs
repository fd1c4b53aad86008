//! Prefetch Module
//!
//! Background fetching of match detail and timelines ahead of the user
//! opening them.
//!
//! - [`PrefetchCoordinator`] deduplicates fetches per match ID and keeps the
//!   results, pending or settled, in [`PrefetchRecord`]s.
//! - [`PrefetchSweeper`] drops stale records on an interval while anyone is
//!   subscribed.
//! - [`MatchSource`] is where the data comes from; [`HttpMatchSource`] reads
//!   the application's own match API through the client caches.

mod coordinator;
mod debounce;
mod record;
mod slot;
mod source;
mod sweeper;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{PrefetchCoordinator, IN_FLIGHT_WINDOW, RECORD_TTL};
pub use debounce::DebounceWindow;
pub use record::{confirmed_match_id, PrefetchRecord};
pub use slot::{SharedFetch, Slot};
pub use source::{HttpMatchSource, MatchSource};
pub use sweeper::{PrefetchSweeper, SweepSubscription, SWEEP_INTERVAL};
