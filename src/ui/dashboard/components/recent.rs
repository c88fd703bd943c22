//! Recent activity panel
//!
//! The latest workouts, meals and weigh-ins from the activity feed

use super::super::state::DashboardState;
use super::super::utils::format_activity_date;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn kind_color(kind: &str) -> Color {
    match kind {
        "workout" => Color::LightGreen,
        "meal" => Color::LightYellow,
        "weight" => Color::LightCyan,
        _ => Color::Gray,
    }
}

pub fn render_recent_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = match &state.recent_activity {
        Some(feed) if !feed.activities.is_empty() => feed
            .activities
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", format_activity_date(&item.date)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:<8}", item.kind),
                        Style::default().fg(kind_color(&item.kind)),
                    ),
                    Span::raw(format!("{}  ", item.title)),
                    Span::styled(item.details.clone(), Style::default().fg(Color::Gray)),
                ])
            })
            .collect(),
        _ => vec![Line::from(Span::styled(
            "No activity yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .title("RECENT ACTIVITY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
