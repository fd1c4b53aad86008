//! A value that is either not requested, still being fetched, or settled.

use std::fmt;

use futures::future::{BoxFuture, Shared};

/// A fetch that any number of readers can await; it runs once.
pub type SharedFetch<T> = Shared<BoxFuture<'static, Option<T>>>;

/// State of one field of a prefetch record.
///
/// A settled fetch is `Ready(None)` when the data is unavailable (network,
/// status or decode failure); readers render that as "unavailable" and must
/// not retry on their own.
#[derive(Clone)]
pub enum Slot<T: Clone> {
    Absent,
    Pending(SharedFetch<T>),
    Ready(Option<T>),
}

impl<T: Clone> Slot<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }

    /// The settled value, if the slot is `Ready` with data.
    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => value.as_ref(),
            _ => None,
        }
    }

    /// Waits for the slot to settle. `Absent` resolves to `None` immediately.
    pub async fn resolve(self) -> Option<T> {
        match self {
            Slot::Absent => None,
            Slot::Pending(fetch) => fetch.await,
            Slot::Ready(value) => value,
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Absent => f.write_str("Absent"),
            Slot::Pending(_) => f.write_str("Pending"),
            Slot::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
        }
    }
}
