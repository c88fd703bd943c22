//! Dashboard footer component
//!
//! Renders key bindings, uptime and the last refresh time

use super::super::state::DashboardState;
use super::super::utils::{format_compact_timestamp, format_uptime};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let uptime = format_uptime(state.start_time.elapsed());
    let footer_text = match state.last_refresh_timestamp() {
        Some(timestamp) => format!(
            "[R] Refresh | [Q] Quit | Open {} | Last refresh {}",
            uptime,
            format_compact_timestamp(timestamp)
        ),
        None => format!("[R] Refresh | [Q] Quit | Open {}", uptime),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
