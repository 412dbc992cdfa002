//! Start menu: title, name entry and the optional leaderboard.

use crate::ui::game_common::{controls_line, render_status_bar};
use crate::ui::leaderboard_panel::render_leaderboard_panel;
use flappy::app::{App, MAX_NAME_LEN};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE_ART: [&str; 5] = [
    "  ___ _                       ",
    " | __| |__ _ _ __ _ __ _  _   ",
    " | _|| / _` | '_ \\ '_ \\ || |  ",
    " |_| |_\\__,_| .__/ .__/\\_, |  ",
    "            |_|  |_|   |__/   ",
];

const MENU_CONTROLS: &[(&str, &str)] = &[
    ("[Enter/Space]", "Start"),
    ("[Tab]", "Leaderboard"),
    ("[Esc]", "Quit"),
];

pub fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flappy ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (main, side) = if app.panel.visible {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(36), Constraint::Length(44)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(2)])
        .split(main);

    render_title_and_name(frame, v_chunks[0], app);

    let name = app.session().player_name().trim();
    let (status, color) = if name.is_empty() {
        ("Enter your name to play", Color::Yellow)
    } else {
        ("Press Enter or Space to flap off!", Color::Green)
    };
    render_status_bar(frame, v_chunks[1], status, color, MENU_CONTROLS);

    if let Some(side) = side {
        render_leaderboard_panel(frame, side, &app.panel);
    }
}

fn render_title_and_name(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    let name = app.session().player_name();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Your name:",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(vec![
        Span::styled(
            format!("[ {:<width$}", name, width = MAX_NAME_LEN),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("]", Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Fly through the gaps. Grab ◆ for speed and invulnerability.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(controls_line(&[("[Space/Up]", "Flap"), ("[P]", "Pause")]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Leaderboard: {}", app.backend_name()),
        Style::default().fg(Color::DarkGray),
    )));

    let height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height - height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, height),
    );
}
