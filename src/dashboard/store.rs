//! Shared dashboard context
//!
//! Holds the current [`ViewState`] and notifies subscribers whenever it changes.

use super::state::{LoadStatus, SliceBatch, ViewState};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// The view state shared by every consumer of the dashboard.
///
/// Each load takes a generation number from [`begin_load`](Self::begin_load). Results
/// from a generation older than the one already applied are discarded, so overlapping
/// refreshes resolve to the most recently started one.
#[derive(Debug)]
pub struct DashboardStore {
    sender: watch::Sender<ViewState>,
    started: AtomicU64,
}

impl DashboardStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ViewState::default());
        Self {
            sender,
            started: AtomicU64::new(0),
        }
    }

    /// A copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.sender.borrow().clone()
    }

    /// Receives every applied batch and status transition.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.sender.subscribe()
    }

    /// Generation of the most recently started load.
    pub fn latest_generation(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    /// Registers a new load and marks the view as loading. Returns its generation.
    pub fn begin_load(&self) -> u64 {
        let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        self.sender.send_modify(|state| state.status = LoadStatus::Loading);
        generation
    }

    /// Applies a whole batch at once. Returns `false` when the batch was stale.
    pub fn apply(&self, generation: u64, batch: SliceBatch) -> bool {
        let latest = self.latest_generation();
        self.sender.send_if_modified(|state| {
            if generation <= state.generation() {
                return false;
            }
            state.apply(batch);
            state.set_generation(generation);
            // A newer load is still running; it decides when the view is ready.
            state.status = if generation >= latest {
                LoadStatus::Ready
            } else {
                LoadStatus::Loading
            };
            true
        })
    }

    /// Records an orchestration fault. Ignored when a newer load has started or applied.
    pub fn fail(&self, generation: u64, message: String) -> bool {
        let latest = self.latest_generation();
        self.sender.send_if_modified(|state| {
            if generation <= state.generation() || generation < latest {
                return false;
            }
            state.set_generation(generation);
            state.status = LoadStatus::Error(message);
            true
        })
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DashboardStats, Streak};

    fn stats_batch(calories: i64) -> SliceBatch {
        SliceBatch {
            stats: Some(DashboardStats {
                calories_consumed: calories,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_marks_ready() {
        let store = DashboardStore::new();
        let generation = store.begin_load();
        assert!(store.snapshot().is_loading());

        assert!(store.apply(generation, stats_batch(1200)));
        let state = store.snapshot();
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.calories_consumed(), 1200);
        assert_eq!(state.generation(), generation);
    }

    #[test]
    // An older load that settles last must not overwrite a newer one.
    fn test_stale_batch_is_discarded() {
        let store = DashboardStore::new();
        let older = store.begin_load();
        let newer = store.begin_load();

        assert!(store.apply(newer, stats_batch(2000)));
        assert!(!store.apply(older, stats_batch(100)));

        let state = store.snapshot();
        assert_eq!(state.calories_consumed(), 2000);
        assert_eq!(state.status, LoadStatus::Ready);
    }

    #[test]
    // An older load that settles first is shown, but the view stays loading.
    fn test_older_batch_applies_while_newer_pending() {
        let store = DashboardStore::new();
        let older = store.begin_load();
        let newer = store.begin_load();

        assert!(store.apply(older, stats_batch(100)));
        assert_eq!(store.snapshot().status, LoadStatus::Loading);

        assert!(store.apply(
            newer,
            SliceBatch {
                streak: Some(Streak {
                    streak: Some(4),
                    last_activity_date: None,
                }),
                ..Default::default()
            }
        ));
        let state = store.snapshot();
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.streak, Some(4));
    }

    #[test]
    fn test_fail_sets_error_without_touching_slices() {
        let store = DashboardStore::new();
        let first = store.begin_load();
        store.apply(first, stats_batch(500));

        let second = store.begin_load();
        assert!(store.fail(second, "dashboard load panicked".to_string()));

        let state = store.snapshot();
        assert_eq!(
            state.status,
            LoadStatus::Error("dashboard load panicked".to_string())
        );
        assert_eq!(state.calories_consumed(), 500);
    }

    #[test]
    fn test_fail_ignored_when_newer_load_started() {
        let store = DashboardStore::new();
        let older = store.begin_load();
        let _newer = store.begin_load();

        assert!(!store.fail(older, "boom".to_string()));
        assert_eq!(store.snapshot().status, LoadStatus::Loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_whole_batches() {
        let store = DashboardStore::new();
        let mut receiver = store.subscribe();

        let generation = store.begin_load();
        store.apply(
            generation,
            SliceBatch {
                stats: Some(DashboardStats::default()),
                streak: Some(Streak::default()),
                goals: Some(None),
                goal_progress: None,
            },
        );

        receiver.changed().await.unwrap();
        let state = receiver.borrow_and_update().clone();
        assert_eq!(state.status, LoadStatus::Ready);
        assert!(state.stats.is_some());
        assert_eq!(state.streak, Some(0));
        assert!(!receiver.has_changed().unwrap());
    }
}
