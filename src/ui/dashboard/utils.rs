//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use ratatui::prelude::Color;
use std::time::Duration;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Stats => Color::Cyan,
        Source::Streak => Color::LightYellow,
        Source::Goals | Source::GoalProgress => Color::LightGreen,
        Source::Activity => Color::LightMagenta,
        Source::Loader => Color::LightBlue,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5))
            {
                return format!("{} {}", month_day, hour_min);
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Shorten an ISO datetime from the API ("2026-02-09T12:30:00.123") to "02-09 12:30".
pub fn format_activity_date(date: &str) -> String {
    format_compact_timestamp(&date.replacen('T', " ", 1))
}

/// Format how long the dashboard has been open, e.g. "1h 05m" or "4m 12s".
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2026-02-09 08:15:42"), "02-09 08:15");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_format_activity_date() {
        assert_eq!(format_activity_date("2026-02-09T12:30:00.123456"), "02-09 12:30");
        assert_eq!(format_activity_date("2026-02-09"), "2026-02-09");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(252)), "4m 12s");
        assert_eq!(format_uptime(Duration::from_secs(3900)), "1h 05m");
        assert_eq!(format_uptime(Duration::ZERO), "0m 00s");
    }
}
