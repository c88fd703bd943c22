//! Dashboard screen state
//!
//! What the terminal dashboard renders: the latest view snapshot plus UI-only extras.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::ViewState;
use crate::environment::Environment;
use crate::events::Event as LoaderEvent;
use crate::models::RecentActivity;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug)]
pub struct DashboardState {
    /// The API the dashboard is reading from.
    pub environment: Environment,
    /// When the dashboard was opened.
    pub start_time: Instant,
    /// Latest snapshot of the shared view state.
    pub view: ViewState,
    /// Last successfully fetched activity feed.
    pub recent_activity: Option<RecentActivity>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<LoaderEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<LoaderEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Timestamp of the last refresh request
    last_refresh_timestamp: Option<String>,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            view: ViewState::default(),
            recent_activity: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            last_refresh_timestamp: None,
        }
    }

    pub fn last_refresh_timestamp(&self) -> &Option<String> {
        &self.last_refresh_timestamp
    }

    pub fn set_last_refresh_timestamp(&mut self, timestamp: Option<String>) {
        self.last_refresh_timestamp = timestamp;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: LoaderEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: LoaderEvent) {
        self.pending_events.push_back(event);
    }
}
