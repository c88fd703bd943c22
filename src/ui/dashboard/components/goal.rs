//! Goal panel component

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_goal_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let view = &state.view;
    let mut lines = Vec::new();

    match &view.goals {
        Some(goal) => {
            lines.push(Line::from(format!(
                "Target: {:.1} lbs (from {:.1})",
                goal.target_weight, goal.start_weight
            )));
            if let Some(date) = goal.target_date {
                lines.push(Line::from(format!("By: {}", date)));
            }
            if let Some(calories) = goal.daily_calorie_goal {
                lines.push(Line::from(format!("Daily calories: {}", calories)));
            }
            if let Some(days) = goal.active_days_per_week {
                lines.push(Line::from(format!("Active days/week: {}", days)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No goal set",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if let Some(progress) = &view.goal_progress {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Lost {:.1} of {:.1} lbs, {:.1} remaining",
                progress.lost_so_far, progress.total_to_lose, progress.remaining
            ),
            Style::default().fg(Color::LightGreen),
        )));
    }

    let block = Block::default()
        .title("GOAL")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
