//! Application shell around a [`GameSession`].
//!
//! Owns the session, feeds it fixed physics ticks from wall-clock time,
//! turns game events into sound cues and HUD flashes, and runs the
//! leaderboard calls in the background.

use crate::config::GameConfig;
use crate::constants::*;
use crate::game::{GameEvent, GameSession, SessionState, SessionSnapshot};
use crate::leaderboard::submit::{fetch_in_background, Pending, TaskPoll};
use crate::leaderboard::{LeaderboardEntry, LeaderboardService, SaveStatus, ScoreSubmission};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Longest player name accepted on the start screen.
pub const MAX_NAME_LEN: usize = 20;

/// Most physics ticks run for one frame, so a stall cannot snowball.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

/// Ticks the HUD flashes after losing a life.
pub const HURT_FLASH_TICKS: u32 = 30;

/// High-level actions the input layer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Flap,
    TogglePause,
    Restart,
    Menu,
    Char(char),
    Backspace,
    ToggleLeaderboard,
    Quit,
}

/// Leaderboard panel on the start and game-over screens.
#[derive(Default)]
pub struct LeaderboardPanel {
    pub visible: bool,
    pub loading: bool,
    pub entries: Vec<LeaderboardEntry>,
    pending: Option<Pending<Vec<LeaderboardEntry>>>,
}

pub struct App<R: Rng = StdRng> {
    session: GameSession,
    rng: R,
    leaderboard: Arc<LeaderboardService>,
    submission: Option<ScoreSubmission>,
    pub save_status: SaveStatus,
    pub panel: LeaderboardPanel,
    pub hurt_flash: u32,
    accumulated_ms: u64,
    pub should_quit: bool,
}

impl App<StdRng> {
    pub fn new(config: GameConfig, leaderboard: Arc<LeaderboardService>) -> Self {
        Self::with_rng(config, leaderboard, StdRng::from_entropy())
    }
}

impl<R: Rng> App<R> {
    pub fn with_rng(config: GameConfig, leaderboard: Arc<LeaderboardService>, mut rng: R) -> Self {
        let session = GameSession::new(config, &mut rng);
        Self {
            session,
            rng,
            leaderboard,
            submission: None,
            save_status: SaveStatus::Idle,
            panel: LeaderboardPanel::default(),
            hurt_flash: 0,
            accumulated_ms: 0,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn backend_name(&self) -> &'static str {
        self.leaderboard.backend_name()
    }

    /// Apply one input. `now_ms` is a monotonic timestamp used for the
    /// flap cooldown.
    pub fn handle_input(&mut self, input: AppInput, now_ms: u64) {
        match input {
            AppInput::Flap => {
                self.session.primary_input(now_ms, &mut self.rng);
            }
            AppInput::TogglePause => {
                self.session.toggle_pause();
            }
            AppInput::Restart => {
                self.session.restart(&mut self.rng);
            }
            AppInput::Menu => {
                self.session.return_to_menu();
            }
            AppInput::Char(c) => self.type_char(c),
            AppInput::Backspace => {
                let mut name = self.session.player_name().to_string();
                name.pop();
                self.session.set_player_name(&name);
            }
            AppInput::ToggleLeaderboard => self.toggle_leaderboard(),
            AppInput::Quit => self.should_quit = true,
        }
        self.process_events();
    }

    fn type_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let mut name = self.session.player_name().to_string();
        if name.chars().count() >= MAX_NAME_LEN {
            return;
        }
        name.push(c);
        self.session.set_player_name(&name);
    }

    fn toggle_leaderboard(&mut self) {
        if !matches!(
            self.session.state(),
            SessionState::NotStarted | SessionState::Ended
        ) {
            return;
        }
        self.panel.visible = !self.panel.visible;
        if self.panel.visible {
            self.refresh_leaderboard();
        }
    }

    fn refresh_leaderboard(&mut self) {
        self.panel.loading = true;
        self.panel.pending = Some(fetch_in_background(
            Arc::clone(&self.leaderboard),
            DEFAULT_LEADERBOARD_LIMIT,
        ));
    }

    /// Advance by `elapsed_ms` of wall time: run whole physics ticks and
    /// poll background work.
    pub fn update(&mut self, elapsed_ms: u64) {
        self.accumulated_ms += elapsed_ms;

        let mut ticks = 0;
        while self.accumulated_ms >= TICK_MS {
            self.accumulated_ms -= TICK_MS;
            if ticks < MAX_TICKS_PER_FRAME {
                self.session.tick(&mut self.rng);
                self.hurt_flash = self.hurt_flash.saturating_sub(1);
                ticks += 1;
            }
        }

        self.process_events();
        self.poll_background();
    }

    fn process_events(&mut self) {
        for event in self.session.drain_events() {
            if let Some(cue) = event.sound() {
                tracing::debug!(sound = cue.name(), "playing sound");
            }

            match event {
                GameEvent::Started | GameEvent::Restarted | GameEvent::ReturnedToMenu => {
                    self.submission = None;
                    self.save_status = SaveStatus::Idle;
                    self.hurt_flash = 0;
                    if event != GameEvent::ReturnedToMenu {
                        self.panel.visible = false;
                    }
                    tracing::info!(?event, player = self.session.player_name(), "session");
                }
                GameEvent::LifeLost { lives } => {
                    self.hurt_flash = HURT_FLASH_TICKS;
                    tracing::info!(lives, "life lost");
                }
                GameEvent::GameOver { score } => {
                    tracing::info!(score, player = self.session.player_name(), "game over");
                    self.begin_save(score);
                }
                GameEvent::PowerUpCollected => tracing::debug!("power-up collected"),
                GameEvent::PowerUpExpired => tracing::debug!("power-up expired"),
                _ => {}
            }
        }
    }

    /// Snapshot the name and score and send them off once per game over.
    fn begin_save(&mut self, score: u32) {
        let username = self.session.player_name().trim().to_string();
        if username.is_empty() || score == 0 {
            self.save_status = SaveStatus::TooLow;
            return;
        }
        self.save_status = SaveStatus::Saving;
        self.submission = Some(ScoreSubmission::start(
            Arc::clone(&self.leaderboard),
            username,
            score,
        ));
    }

    fn poll_background(&mut self) {
        if let Some(submission) = &self.submission {
            if let Some(status) = submission.poll() {
                self.submission = None;
                // Re-rank with the new score if the board is open.
                if status == SaveStatus::Saved && self.panel.visible {
                    self.refresh_leaderboard();
                }
                self.save_status = status;
            }
        }

        if let Some(pending) = &self.panel.pending {
            match pending.poll() {
                TaskPoll::Waiting => {}
                TaskPoll::Done(entries) => {
                    self.panel.entries = entries;
                    self.panel.loading = false;
                    self.panel.pending = None;
                }
                TaskPoll::Lost => {
                    self.panel.entries.clear();
                    self.panel.loading = false;
                    self.panel.pending = None;
                }
            }
        }
    }

    /// True while background work is still running.
    pub fn has_background_work(&self) -> bool {
        self.submission.is_some() || self.panel.pending.is_some()
    }
}
