//! Keyboard mapping from crossterm key events to [`AppInput`].

use crate::app::AppInput;
use crate::game::SessionState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key press for the current session state. Unbound keys
/// yield `None`.
pub fn map_key(key: KeyEvent, state: SessionState) -> Option<AppInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppInput::Quit);
    }

    match state {
        SessionState::NotStarted => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppInput::Flap),
            KeyCode::Tab => Some(AppInput::ToggleLeaderboard),
            KeyCode::Backspace => Some(AppInput::Backspace),
            KeyCode::Esc => Some(AppInput::Quit),
            KeyCode::Char(c) => Some(AppInput::Char(c)),
            _ => None,
        },
        SessionState::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') => {
                Some(AppInput::Flap)
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(AppInput::TogglePause),
            _ => None,
        },
        SessionState::Paused => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(AppInput::Flap),
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(AppInput::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(AppInput::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(AppInput::Menu),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(AppInput::Quit),
            _ => None,
        },
        SessionState::Ended => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(AppInput::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(AppInput::Menu),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(AppInput::Quit),
            KeyCode::Tab => Some(AppInput::ToggleLeaderboard),
            _ => None,
        },
    }
}
