//! Dashboard state update logic
//!
//! Folds loader events, view snapshots and activity feeds into the screen state.

use super::state::DashboardState;

use crate::dashboard::ViewState;
use crate::events::{Event as LoaderEvent, EventType};
use crate::models::RecentActivity;

impl DashboardState {
    /// Advance one tick and process queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    /// Replace the rendered snapshot with the latest shared view state.
    pub fn apply_view(&mut self, view: ViewState) {
        self.view = view;
    }

    pub fn set_recent_activity(&mut self, feed: RecentActivity) {
        self.recent_activity = Some(feed);
    }

    fn process_event(&mut self, event: &LoaderEvent) {
        if event.event_type == EventType::Refresh {
            self.set_last_refresh_timestamp(Some(event.timestamp.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
    use crate::environment::Environment;
    use crate::events::Source;
    use crate::logging::LogLevel;
    use crate::ui::app::UIConfig;
    use std::time::Instant;

    fn new_state() -> DashboardState {
        DashboardState::new(Environment::Local, Instant::now(), UIConfig::new(false))
    }

    #[test]
    fn test_update_moves_events_into_activity_log() {
        let mut state = new_state();
        let mut refresh = LoaderEvent::refresh("Refreshing dashboard (#1)");
        refresh.timestamp = "2026-02-09 08:00:00".to_string();
        state.add_event(refresh);
        state.add_event(LoaderEvent::error(Source::Goals, "Not found", LogLevel::Debug));

        state.update();

        assert!(state.pending_events.is_empty());
        assert_eq!(state.activity_logs.len(), 2);
        assert_eq!(
            state.last_refresh_timestamp().as_deref(),
            Some("2026-02-09 08:00:00")
        );
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = new_state();
        for i in 0..MAX_ACTIVITY_LOGS + 5 {
            state.add_event(LoaderEvent::success(Source::Stats, format!("Loaded {}", i)));
        }
        state.update();

        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(state.activity_logs.front().unwrap().msg, "Loaded 5");
    }
}
