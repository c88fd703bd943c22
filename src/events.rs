//! Event System
//!
//! Diagnostic events emitted while the dashboard loads, shown in the activity log.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

/// Where an event originated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum Source {
    /// `GET /dashboard/stats`
    Stats,
    /// `GET /dashboard/streak`
    Streak,
    /// `GET /goals`
    Goals,
    /// `GET /goals/progress`
    GoalProgress,
    /// The recent activity feed.
    Activity,
    /// The load orchestration itself.
    Loader,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn success(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Success, LogLevel::Debug)
    }

    pub fn error(source: Source, msg: impl Into<String>, log_level: LogLevel) -> Self {
        Self::new(source, msg.into(), EventType::Error, log_level)
    }

    pub fn refresh(msg: impl Into<String>) -> Self {
        Self::new(Source::Loader, msg.into(), EventType::Refresh, LogLevel::Info)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

/// Non-blocking event delivery. A full or closed channel drops the event.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub fn send_event(&self, event: Event) {
        let _ = self.sender.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let mut event = Event::error(Source::GoalProgress, "HTTP 404", LogLevel::Debug);
        event.timestamp = "2026-02-09 08:00:00".to_string();
        assert_eq!(
            event.to_string(),
            "Error [2026-02-09 08:00:00] GoalProgress: HTTP 404"
        );
    }

    #[test]
    fn test_success_always_displayed() {
        assert!(Event::success(Source::Stats, "ok").should_display());
        assert!(Event::refresh("Refreshing").should_display());
        assert!(Event::error(Source::Streak, "down", LogLevel::Warn).should_display());
    }

    #[tokio::test]
    async fn test_sender_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let sender = EventSender::new(tx);
        sender.send_event(Event::refresh("first"));
        sender.send_event(Event::refresh("second"));

        assert_eq!(rx.recv().await.unwrap().msg, "first");
        assert!(rx.try_recv().is_err());
    }
}
