//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::{RECENT_ACTIVITY_LIMIT, UI_TICK_MS};
use crate::dashboard::{DashboardLoader, ViewState};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event as LoaderEvent, EventSender, Source};
use crate::models::RecentActivity;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// Application state
pub struct App {
    /// Loads the dashboard and owns the shared view state.
    loader: Arc<DashboardLoader>,

    /// Sends events for work started by the UI itself.
    event_sender: EventSender,

    /// Receives loader events.
    event_receiver: mpsc::Receiver<LoaderEvent>,

    /// Notified whenever the shared view state changes.
    view_receiver: watch::Receiver<ViewState>,

    /// Carries fetched activity feeds back to the render loop.
    activity_sender: mpsc::Sender<RecentActivity>,
    activity_receiver: mpsc::Receiver<RecentActivity>,

    /// The dashboard screen.
    state: DashboardState,
}

impl App {
    pub fn new(
        loader: Arc<DashboardLoader>,
        event_sender: EventSender,
        event_receiver: mpsc::Receiver<LoaderEvent>,
        ui_config: UIConfig,
    ) -> Self {
        let view_receiver = loader.store().subscribe();
        let (activity_sender, activity_receiver) = mpsc::channel(4);
        let state = DashboardState::new(
            loader.api().environment().clone(),
            Instant::now(),
            ui_config,
        );
        Self {
            loader,
            event_sender,
            event_receiver,
            view_receiver,
            activity_sender,
            activity_receiver,
            state,
        }
    }

    /// Starts a dashboard load and an activity feed fetch in the background.
    ///
    /// Never blocks the render loop. A refresh while another is still running starts a
    /// new load; the most recently started one wins.
    pub fn request_refresh(&self) {
        let loader = Arc::clone(&self.loader);
        tokio::spawn(async move {
            loader.refresh().await;
        });

        let api = Arc::clone(self.loader.api());
        let activity_sender = self.activity_sender.clone();
        let event_sender = self.event_sender.clone();
        tokio::spawn(async move {
            match api.recent_activity(RECENT_ACTIVITY_LIMIT).await {
                Ok(feed) => {
                    let _ = activity_sender.send(feed).await;
                }
                Err(e) => {
                    let level = ErrorClassifier::new().classify_fetch_error(&e);
                    log::log!(log::Level::from(level), "Recent activity failed: {}", e);
                    event_sender.send_event(LoaderEvent::error(Source::Activity, e.to_pretty(), level));
                }
            }
        });
    }

    /// Pulls everything that arrived since the last frame into the screen state.
    fn sync(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
        while let Ok(feed) = self.activity_receiver.try_recv() {
            self.state.set_recent_activity(feed);
        }
        if self.view_receiver.has_changed().unwrap_or(false) {
            let view = self.view_receiver.borrow_and_update().clone();
            self.state.apply_view(view);
        }
        self.state.update();
    }
}

/// Runs the dashboard UI until the user quits.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    // Initial load on entry
    app.request_refresh();

    loop {
        app.sync();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(UI_TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.request_refresh(),
                    _ => {}
                }
            }
        }
    }
}
