//! Periodic Prefetch Sweep
//!
//! One interval task per process, alive only while someone subscribes.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::PrefetchCoordinator;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs [`PrefetchCoordinator::sweep`] on an interval while it has subscribers.
///
/// The first [`subscribe`](Self::subscribe) starts the task; dropping the last
/// [`SweepSubscription`] stops it. Subscriber count and task handle change
/// under one lock, so two tasks never run at once.
#[derive(Clone)]
pub struct PrefetchSweeper {
    coordinator: PrefetchCoordinator,
    interval: Duration,
    state: Arc<Mutex<SweeperState>>,
}

#[derive(Default)]
struct SweeperState {
    subscribers: usize,
    task: Option<JoinHandle<()>>,
}

/// Keeps the sweep running while held.
#[must_use = "the sweep stops when the subscription is dropped"]
pub struct SweepSubscription {
    state: Arc<Mutex<SweeperState>>,
}

impl PrefetchSweeper {
    pub fn new(coordinator: PrefetchCoordinator) -> Self {
        Self::with_interval(coordinator, SWEEP_INTERVAL)
    }

    pub fn with_interval(coordinator: PrefetchCoordinator, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
            state: Arc::new(Mutex::new(SweeperState::default())),
        }
    }

    /// Registers a consumer, starting the sweep task if it is the first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe(&self) -> SweepSubscription {
        let mut state = self.state.lock();
        state.subscribers += 1;
        if state.subscribers == 1 {
            state.task = Some(spawn_sweep_task(self.coordinator.clone(), self.interval));
        }
        SweepSubscription {
            state: self.state.clone(),
        }
    }

    pub fn subscribers(&self) -> usize {
        self.state.lock().subscribers
    }

    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SweepSubscription {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers == 0 {
            if let Some(task) = state.task.take() {
                task.abort();
                debug!("prefetch sweep stopped");
            }
        }
    }
}

fn spawn_sweep_task(coordinator: PrefetchCoordinator, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "prefetch sweep started");
        loop {
            tokio::time::sleep(interval).await;

            let removed = coordinator.sweep();
            if removed > 0 {
                debug!(removed, "prefetch sweep dropped stale records");
            }
        }
    })
}
