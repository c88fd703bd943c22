//! Headless mode execution

use super::{
    SessionData,
    messages::{
        print_no_data, print_session_exit_success, print_session_shutdown, print_session_starting,
    },
};
use crate::config::Config;
use crate::consts::cli_consts::{DEFAULT_WATCH_INTERVAL_SECS, MIN_WATCH_INTERVAL_SECS};
use crate::dashboard::{LoadReport, LoadStatus, ViewState};
use crate::events::{Event, EventType};
use std::error::Error;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Runs the dashboard without a terminal UI
///
/// This function handles:
/// 1. The initial load and its summary
/// 2. Optional periodic refresh, printing each new view
/// 3. Ctrl+C shutdown handling
///
/// # Arguments
/// * `session` - Session data from setup
/// * `watch_interval` - Refresh period; `None` loads once and returns
pub async fn run_headless_mode(
    mut session: SessionData,
    watch_interval: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment.api_url());

    let report = session.loader.load().await;
    println!("{}", format_summary(&session.loader.store().snapshot()));
    print!("{}", format_outcome(&report));
    if report.all_failed() {
        print_no_data();
    }

    let Some(period) = watch_interval else {
        return Ok(());
    };

    // The outcome above already reported these.
    let skipped = discard_pending(&mut session.event_receiver);
    log::debug!("Skipped {} events from the first load", skipped);

    // Trigger shutdown on Ctrl+C
    let (shutdown_sender, _) = broadcast::channel::<()>(1);
    let shutdown_sender_clone = shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    // Periodic refresh
    let loader = Arc::clone(&session.loader);
    let mut refresher_shutdown = shutdown_sender.subscribe();
    let refresher = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = loader.refresh().await;
                    if report.all_failed() {
                        print_no_data();
                    }
                }
                _ = refresher_shutdown.recv() => break,
            }
        }
    });

    let mut view_receiver = session.loader.store().subscribe();
    let mut shutdown_receiver = shutdown_sender.subscribe();

    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.event_type == EventType::Error && event.should_display() {
                    println!("{}", event);
                }
            }
            changed = view_receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = view_receiver.borrow_and_update().clone();
                if !view.is_loading() {
                    println!("{}", format_summary(&view));
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    let _ = shutdown_sender.send(());
    let _ = refresher.await;
    print_session_exit_success();

    Ok(())
}

/// Drops events already queued, returning how many there were.
fn discard_pending(receiver: &mut mpsc::Receiver<Event>) -> usize {
    let mut discarded = 0;
    while receiver.try_recv().is_ok() {
        discarded += 1;
    }
    discarded
}

/// Refresh period for `--watch`. A bare `--watch` (given as 0) falls back to the settings
/// file, then to the default. Periods shorter than the minimum are raised to it.
pub fn watch_interval(flag: Option<u64>, config: &Config) -> Option<Duration> {
    let secs = match flag? {
        0 => config
            .refresh_interval_secs
            .unwrap_or(DEFAULT_WATCH_INTERVAL_SECS),
        secs => secs,
    };
    Some(Duration::from_secs(secs.max(MIN_WATCH_INTERVAL_SECS)))
}

/// Plain-text rendering of the view, with placeholders for missing slices.
pub fn format_summary(view: &ViewState) -> String {
    let mut out = String::new();
    let status = match &view.status {
        LoadStatus::Loading => "loading".to_string(),
        LoadStatus::Ready => "ready".to_string(),
        LoadStatus::Error(message) => format!("error: {}", message),
    };
    let _ = writeln!(out, "Dashboard ({})", status);

    let calories = match view.goals.as_ref().and_then(|g| g.daily_calorie_goal) {
        Some(goal) => format!("{} / {}", view.calories_consumed(), goal),
        None => view.calories_consumed().to_string(),
    };
    let _ = writeln!(out, "  Calories:  {}", calories);
    let _ = writeln!(out, "  Workouts:  {}", view.workout_count());
    let _ = writeln!(out, "  Weight:    {}", view.weight_label());
    let _ = writeln!(out, "  Streak:    {} days", view.streak_days());

    match &view.goals {
        Some(goal) => {
            let _ = writeln!(
                out,
                "  Goal:      {:.1} -> {:.1} lbs",
                goal.start_weight, goal.target_weight
            );
        }
        None => {
            let _ = writeln!(out, "  Goal:      --");
        }
    }
    let _ = write!(out, "  Progress:  {:.0}%", view.percent_complete());
    out
}

/// One line per source that failed during the load.
pub fn format_outcome(report: &LoadReport) -> String {
    let mut out = String::new();
    if let Some(fault) = &report.fault {
        let _ = writeln!(out, "  ! load aborted: {}", fault);
        return out;
    }
    if report.is_complete() {
        let _ = writeln!(out, "  all sources loaded");
        return out;
    }
    for (source, message) in &report.failed {
        let _ = writeln!(out, "  ! {} unavailable: {}", source, message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventSender, Source};
    use crate::logging::LogLevel;
    use crate::models::{DashboardStats, GoalProgress};

    #[test]
    fn test_summary_uses_placeholders() {
        let view = ViewState::default();
        let summary = format_summary(&view);
        assert!(summary.starts_with("Dashboard (loading)"));
        assert!(summary.contains("Calories:  0"));
        assert!(summary.contains("Weight:    --"));
        assert!(summary.contains("Streak:    0 days"));
        assert!(summary.contains("Goal:      --"));
        assert!(summary.ends_with("Progress:  0%"));
    }

    #[test]
    fn test_summary_with_data() {
        let mut view = ViewState::default();
        view.stats = Some(DashboardStats {
            calories_consumed: 1200,
            workout_count: 1,
            current_weight: Some(182.44),
            ..Default::default()
        });
        view.streak = Some(5);
        view.goal_progress = Some(GoalProgress {
            percent_complete: 40.0,
            ..Default::default()
        });
        view.status = LoadStatus::Ready;
        let summary = format_summary(&view);
        assert!(summary.starts_with("Dashboard (ready)"));
        assert!(summary.contains("Calories:  1200"));
        assert!(summary.contains("Workouts:  1"));
        assert!(summary.contains("Weight:    182.4"));
        assert!(summary.contains("Streak:    5 days"));
        assert!(summary.ends_with("Progress:  40%"));
    }

    #[test]
    fn test_watch_interval_resolution() {
        let config = Config {
            api_url: None,
            refresh_interval_secs: Some(30),
        };
        assert_eq!(watch_interval(None, &config), None);
        assert_eq!(watch_interval(Some(0), &config), Some(Duration::from_secs(30)));
        assert_eq!(watch_interval(Some(15), &config), Some(Duration::from_secs(15)));
        assert_eq!(
            watch_interval(Some(1), &config),
            Some(Duration::from_secs(MIN_WATCH_INTERVAL_SECS))
        );
        assert_eq!(
            watch_interval(Some(0), &Config::default()),
            Some(Duration::from_secs(DEFAULT_WATCH_INTERVAL_SECS))
        );
    }

    #[test]
    fn test_outcome_lists_failures() {
        let report = LoadReport {
            generation: 1,
            succeeded: vec![Source::Stats, Source::Streak, Source::GoalProgress],
            failed: vec![(Source::Goals, "Not found: Not Found".to_string())],
            fault: None,
            applied: true,
        };
        assert_eq!(
            format_outcome(&report),
            "  ! Goals unavailable: Not found: Not Found\n"
        );
    }

    #[test]
    fn test_outcome_for_complete_load() {
        let report = LoadReport {
            generation: 2,
            succeeded: vec![
                Source::Stats,
                Source::Streak,
                Source::Goals,
                Source::GoalProgress,
            ],
            failed: Vec::new(),
            fault: None,
            applied: true,
        };
        assert_eq!(format_outcome(&report), "  all sources loaded\n");
    }

    #[tokio::test]
    // Failures printed with the first outcome are not repeated once watching starts.
    async fn test_discard_pending_drains_queued_events() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);
        sender.send_event(Event::error(Source::Goals, "Not found", LogLevel::Debug));
        sender.send_event(Event::success(Source::Stats, "Loaded"));

        assert_eq!(discard_pending(&mut rx), 2);
        assert!(rx.try_recv().is_err());

        sender.send_event(Event::success(Source::Streak, "Loaded"));
        assert_eq!(rx.recv().await.unwrap().source, Source::Streak);
    }
}
