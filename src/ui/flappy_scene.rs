//! UI rendering for a running, paused or finished session.

use crate::ui::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar,
};
use crate::ui::leaderboard_panel::render_leaderboard_panel;
use flappy::app::App;
use flappy::constants::*;
use flappy::game::{Entity, SessionSnapshot, SessionState, SpeedMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Horizontal slice of the world shown on screen.
const VIEW_MIN_X: f64 = EXIT_X;
const VIEW_MAX_X: f64 = SPAWN_X;

const PLAY_CONTROLS: &[(&str, &str)] = &[("[Space/Up]", "Flap"), ("[P/Esc]", "Pause")];
const PAUSE_CONTROLS: &[(&str, &str)] = &[
    ("[Space]", "Resume"),
    ("[R]", "Restart"),
    ("[M]", "Menu"),
    ("[Q]", "Quit"),
];
const GAME_OVER_CONTROLS: &[(&str, &str)] = &[
    ("[R]", "Retry"),
    ("[Tab]", "Leaderboard"),
    ("[M]", "Menu"),
    ("[Q]", "Quit"),
];

/// What occupies one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Pipe,
    PowerUp,
    Bird,
}

/// World coordinates at the center of a cell. Row 0 is the ceiling.
fn cell_center(col: usize, row: usize, width: usize, height: usize) -> (f64, f64) {
    let x = VIEW_MIN_X + (col as f64 + 0.5) / width as f64 * (VIEW_MAX_X - VIEW_MIN_X);
    let y = CEILING_Y - (row as f64 + 0.5) / height as f64 * (CEILING_Y - FLOOR_Y);
    (x, y)
}

/// The cell a world point falls in, if on screen.
fn world_to_cell(x: f64, y: f64, width: usize, height: usize) -> Option<(usize, usize)> {
    let fx = (x - VIEW_MIN_X) / (VIEW_MAX_X - VIEW_MIN_X);
    let fy = (CEILING_Y - y) / (CEILING_Y - FLOOR_Y);
    if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
        return None;
    }
    Some(((fx * width as f64) as usize, (fy * height as f64) as usize))
}

fn classify(snapshot: &SessionSnapshot, col: usize, row: usize, width: usize, height: usize) -> Cell {
    let bird = &snapshot.bird;
    if world_to_cell(bird.x, bird.y, width, height) == Some((col, row)) {
        return Cell::Bird;
    }

    let (x, y) = cell_center(col, row, width, height);
    for entity in &snapshot.entities {
        match entity {
            Entity::Obstacle(o) => {
                if o.top_bounds().contains(x, y) || o.bottom_bounds().contains(x, y) {
                    return Cell::Pipe;
                }
            }
            Entity::PowerUp(p) => {
                if !p.collected && p.bounds().contains(x, y) {
                    return Cell::PowerUp;
                }
            }
        }
    }
    Cell::Empty
}

/// Render the game screen for the current state.
pub fn render_flappy(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let border = if snapshot.power_up_active {
        Color::Magenta
    } else {
        Color::Cyan
    };
    let layout = create_game_layout(frame, area, " Flappy ", border, 10, 24);

    render_play_area(frame, layout.content, &snapshot, app.hurt_flash > 0);
    render_status_bar_content(frame, layout.status_bar, &snapshot);
    render_info_panel(frame, layout.info_panel, &snapshot);

    match snapshot.state {
        SessionState::Paused => render_modal(
            frame,
            layout.content,
            Color::Yellow,
            "PAUSED",
            vec![Line::from(format!("Score: {}", snapshot.score))],
            PAUSE_CONTROLS,
        ),
        SessionState::Ended => render_game_over(frame, layout.content, &snapshot, app),
        _ => {}
    }
}

/// Render the world: pipes, power-ups and the bird.
fn render_play_area(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, hurt: bool) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let bird_style = if hurt && snapshot.tick_count % 8 < 4 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if snapshot.power_up_active {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    let bird_char = if snapshot.bird.is_rising() {
        "▲"
    } else if snapshot.bird.velocity > MAX_FALL_SPEED / 2.0 {
        "▼"
    } else {
        "►"
    };
    // Spin the power-up glyph.
    let power_up_char = ["◆", "◇"][(snapshot.tick_count / 10 % 2) as usize];

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let span = match classify(snapshot, col, row, width, height) {
                Cell::Bird => Span::styled(bird_char, bird_style),
                Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                Cell::PowerUp => Span::styled(power_up_char, Style::default().fg(Color::Magenta)),
                Cell::Empty => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    match snapshot.state {
        SessionState::Playing if snapshot.power_up_active => render_status_bar(
            frame,
            area,
            &format!("POWER UP: {}s", snapshot.power_up_secs_left),
            Color::Magenta,
            PLAY_CONTROLS,
        ),
        SessionState::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snapshot.score),
            Color::Green,
            PLAY_CONTROLS,
        ),
        SessionState::Paused => {
            render_status_bar(frame, area, "Paused", Color::Yellow, PAUSE_CONTROLS)
        }
        _ => render_status_bar(frame, area, "Game over", Color::Red, GAME_OVER_CONTROLS),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let inner = render_info_panel_frame(frame, area, " Info ");
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let hearts = "♥".repeat(snapshot.lives as usize)
        + &"♡".repeat(MAX_LIVES.saturating_sub(snapshot.lives) as usize);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", snapshot.player_name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Lives: ", label),
            Span::styled(hearts, Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Speed: ", label),
            match snapshot.speed_mode {
                SpeedMode::Normal => Span::styled("normal", Style::default().fg(Color::White)),
                SpeedMode::Boosted => Span::styled(
                    "BOOST",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            },
        ]),
        Line::from(vec![
            Span::styled(" Gap: ", label),
            Span::styled(
                format!("{}", snapshot.pipe_gap),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    if snapshot.power_up_active {
        let bar_width = (inner.width as usize).saturating_sub(4);
        let filled = power_up_bar_fill(
            snapshot.power_up_secs_left,
            snapshot.power_up_duration,
            bar_width,
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" POWER UP: {}s", snapshot.power_up_secs_left),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled("█".repeat(filled), Style::default().fg(Color::Magenta)),
            Span::styled("░".repeat(bar_width - filled), label),
        ]));
        lines.push(Line::from(Span::styled(" Invulnerable", label)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Filled cells of the power-up countdown bar.
fn power_up_bar_fill(secs_left: u32, duration: f64, bar_width: usize) -> usize {
    if duration <= 0.0 {
        return 0;
    }
    let frac = (secs_left as f64 / duration).min(1.0);
    (frac * bar_width as f64) as usize
}

/// Game-over modal, with the leaderboard underneath when toggled on.
fn render_game_over(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, app: &App) {
    let modal_area = if app.panel.visible {
        let board_height = (app.panel.entries.len().max(1) as u16 + 2).min(area.height / 2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(board_height)])
            .split(area);
        render_leaderboard_panel(frame, chunks[1], &app.panel);
        chunks[0]
    } else {
        area
    };

    let mut body = vec![Line::from(Span::styled(
        format!("{} scored {}", snapshot.player_name, snapshot.score),
        Style::default().fg(Color::White),
    ))];
    if let Some(message) = app.save_status.message() {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Cyan),
        )));
    }
    render_modal(frame, modal_area, Color::Red, "GAME OVER", body, GAME_OVER_CONTROLS);
}
