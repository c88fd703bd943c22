//! Dashboard view state
//!
//! The composite view assembled from four independently fetched slices.

use crate::models::{DashboardStats, Goal, GoalProgress, Streak};

/// Progress of the most recent dashboard load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// The load orchestration itself faulted. Failed requests never end up here.
    Error(String),
}

/// Everything the dashboard shows. A `None` slice has not been fetched successfully yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Today's aggregate numbers.
    pub stats: Option<DashboardStats>,
    /// Consecutive active days.
    pub streak: Option<u32>,
    /// The user's targets.
    pub goals: Option<Goal>,
    /// Progress against the targets.
    pub goal_progress: Option<GoalProgress>,
    pub status: LoadStatus,
    /// Load generation whose batch was applied last.
    generation: u64,
}

/// Outcome of one load: `Some` for every source that answered, `None` for every one that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceBatch {
    pub stats: Option<DashboardStats>,
    pub streak: Option<Streak>,
    /// `Some(None)` is a successful answer saying no goal is set.
    pub goals: Option<Option<Goal>>,
    pub goal_progress: Option<GoalProgress>,
}

impl ViewState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    /// Overwrites the slices whose source answered; the rest keep their value.
    pub(crate) fn apply(&mut self, batch: SliceBatch) {
        if let Some(stats) = batch.stats {
            self.stats = Some(stats);
        }
        if let Some(streak) = batch.streak {
            self.streak = Some(streak.days());
        }
        if let Some(goals) = batch.goals {
            self.goals = goals;
        }
        if let Some(progress) = batch.goal_progress {
            self.goal_progress = Some(progress);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// True when no slice holds data.
    pub fn is_empty(&self) -> bool {
        self.stats.is_none()
            && self.streak.is_none()
            && self.goals.is_none()
            && self.goal_progress.is_none()
    }

    // Placeholder-aware accessors for rendering

    pub fn calories_consumed(&self) -> i64 {
        self.stats.as_ref().map_or(0, |s| s.calories_consumed)
    }

    pub fn workout_count(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.workout_count)
    }

    pub fn weight_label(&self) -> String {
        self.stats
            .as_ref()
            .and_then(|s| s.current_weight)
            .map(|w| format!("{:.1}", w))
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn streak_days(&self) -> u32 {
        self.streak.unwrap_or(0)
    }

    pub fn percent_complete(&self) -> f64 {
        self.goal_progress
            .as_ref()
            .map_or(0.0, |p| p.percent_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_and_loading() {
        let state = ViewState::default();
        assert!(state.is_empty());
        assert!(state.is_loading());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    // Missing slices render as placeholders.
    fn test_placeholders_for_absent_slices() {
        let state = ViewState::default();
        assert_eq!(state.calories_consumed(), 0);
        assert_eq!(state.workout_count(), 0);
        assert_eq!(state.weight_label(), "--");
        assert_eq!(state.streak_days(), 0);
        assert_eq!(state.percent_complete(), 0.0);
    }

    #[test]
    fn test_apply_keeps_failed_slices() {
        let mut state = ViewState {
            streak: Some(3),
            goals: Some(Goal {
                target_weight: 170.0,
                ..Default::default()
            }),
            ..Default::default()
        };

        state.apply(SliceBatch {
            stats: Some(DashboardStats {
                calories_consumed: 900,
                ..Default::default()
            }),
            streak: None,
            goals: None,
            goal_progress: None,
        });

        assert_eq!(state.calories_consumed(), 900);
        assert_eq!(state.streak, Some(3));
        assert_eq!(state.goals.as_ref().map(|g| g.target_weight), Some(170.0));
    }

    #[test]
    // A successful `null` goals answer clears the slice.
    fn test_apply_clears_goals_on_null_answer() {
        let mut state = ViewState {
            goals: Some(Goal::default()),
            ..Default::default()
        };
        state.apply(SliceBatch {
            goals: Some(None),
            ..Default::default()
        });
        assert!(state.goals.is_none());
    }

    #[test]
    fn test_streak_without_count_is_zero() {
        let mut state = ViewState::default();
        state.apply(SliceBatch {
            streak: Some(Streak::default()),
            ..Default::default()
        });
        assert_eq!(state.streak, Some(0));
    }
}
