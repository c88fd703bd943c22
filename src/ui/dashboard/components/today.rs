//! Today's stats panel
//!
//! Calories, workouts, weight and streak, with placeholders for slices not loaded yet

use crate::environment::Environment;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

pub fn render_today_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let view = &state.view;
    let calorie_goal = view.goals.as_ref().and_then(|g| g.daily_calorie_goal);
    let weekly_workouts = view.goals.as_ref().and_then(|g| g.weekly_workouts);

    let calories = match calorie_goal {
        Some(goal) => format!("{} / {}", view.calories_consumed(), goal),
        None => view.calories_consumed().to_string(),
    };
    let workouts = match weekly_workouts {
        Some(target) => format!("{} (goal {}/wk)", view.workout_count(), target),
        None => view.workout_count().to_string(),
    };
    let streak = match view.streak_days() {
        1 => "1 day".to_string(),
        days => format!("{} days", days),
    };

    let mut lines = vec![
        stat_line("Calories", calories, Color::LightYellow),
        stat_line("Workouts", workouts, Color::LightGreen),
        stat_line("Weight", view.weight_label(), Color::LightCyan),
        stat_line("Streak", streak, Color::LightMagenta),
        Line::from(""),
    ];

    if let Some(stats) = &view.stats {
        lines.push(stat_line(
            "Burned",
            stats.calories_burned.to_string(),
            Color::Gray,
        ));
        lines.push(stat_line(
            "Protein",
            format!("{}g", stats.protein_consumed),
            Color::Gray,
        ));
    }

    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom(_) => Color::Yellow,
    };
    lines.push(Line::from(vec![Span::styled(
        format!("API: {}", state.environment.api_url()),
        Style::default().fg(env_color),
    )]));

    let block = Block::default()
        .title("TODAY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
