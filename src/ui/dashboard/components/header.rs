//! Dashboard header component
//!
//! Renders the title and goal progress gauge

use super::super::state::DashboardState;
use crate::dashboard::LoadStatus;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and goal progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("BARELY SURVIVING v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let view = &state.view;
    let (progress_text, gauge_color, progress_percent) = match &view.status {
        LoadStatus::Loading => {
            // Loops every 20 ticks while requests are in flight
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            ("LOADING - Fetching dashboard".to_string(), Color::LightBlue, progress)
        }
        LoadStatus::Error(message) => (format!("ERROR - {}", message), Color::LightRed, 100),
        LoadStatus::Ready => match &view.goal_progress {
            Some(progress) => (
                format!(
                    "GOAL - {:.0}% complete ({:.1} lbs to go)",
                    progress.percent_complete, progress.remaining
                ),
                Color::LightGreen,
                progress.gauge_percent(),
            ),
            None if view.is_empty() => (
                "NO DATA - Press R to retry".to_string(),
                Color::LightYellow,
                0,
            ),
            None => ("GOAL - No goal set".to_string(), Color::DarkGray, 0),
        },
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
