//! Terminal presentation layer.

pub mod flappy_scene;
pub mod game_common;
pub mod leaderboard_panel;
pub mod menu_scene;

use flappy::app::App;
use flappy::game::SessionState;
use ratatui::Frame;

/// Draw whichever screen matches the session state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();
    match app.state() {
        SessionState::NotStarted => menu_scene::render_menu(frame, area, app),
        _ => flappy_scene::render_flappy(frame, area, app),
    }
}
