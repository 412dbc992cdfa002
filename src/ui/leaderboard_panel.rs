//! Top-scores panel shown beside the start menu.

use crate::ui::game_common::render_info_panel_frame;
use flappy::app::LeaderboardPanel;
use flappy::leaderboard::LeaderboardEntry;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One ranked row: position, name, score and date.
fn entry_line(rank: usize, entry: &LeaderboardEntry, name_width: usize) -> Line<'static> {
    let rank_color = match rank {
        1 => Color::Yellow,
        2 => Color::White,
        3 => Color::LightRed,
        _ => Color::DarkGray,
    };
    let name: String = entry.username.chars().take(name_width).collect();
    Line::from(vec![
        Span::styled(format!(" {:>2}. ", rank), Style::default().fg(rank_color)),
        Span::styled(
            format!("{:<width$}", name, width = name_width),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" {:>5}", entry.score),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", entry.created_at.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub fn render_leaderboard_panel(frame: &mut Frame, area: Rect, panel: &LeaderboardPanel) {
    let inner = render_info_panel_frame(frame, area, " Leaderboard ");
    if inner.height == 0 || inner.width < 10 {
        return;
    }

    let lines = if panel.loading {
        vec![Line::from(Span::styled(
            " Loading...",
            Style::default().fg(Color::Yellow),
        ))]
    } else if panel.entries.is_empty() {
        vec![Line::from(Span::styled(
            " No scores yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        // rank, score and date columns take 23 cells
        let name_width = (inner.width as usize).saturating_sub(23).clamp(4, 16);
        panel
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| entry_line(i + 1, entry, name_width))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines), inner);
}
