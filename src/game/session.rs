//! Session state machine.
//!
//! ```text
//! NotStarted ──start──▶ Playing ◀──resume── Paused
//!      ▲                  │  └────pause────▶  │
//!      │                  ▼                   │
//!      └──menu────────  Ended ◀───────────────┘ (menu / restart)
//! ```
//!
//! Invalid transitions are ignored and report `false`.

use super::events::GameEvent;
use super::physics;
use super::power_up::PowerUpTimer;
use super::spawner;
use super::types::{Bird, Entity, SessionState, SpeedMode};
use crate::config::GameConfig;
use crate::constants::*;
use rand::Rng;

/// One play-through's worth of state, owned by the game loop.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    state: SessionState,
    score: u32,
    lives: u8,
    player_name: String,
    power_up: PowerUpTimer,
    pub bird: Bird,
    pub entities: Vec<Entity>,
    /// Timestamp of the last accepted primary input, for debouncing.
    last_input_ms: Option<u64>,
    tick_count: u64,
    events: Vec<GameEvent>,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub score: u32,
    pub lives: u8,
    pub player_name: String,
    pub power_up_active: bool,
    pub power_up_secs_left: u32,
    /// Full power-up duration for this session's config.
    pub power_up_duration: f64,
    pub speed_mode: SpeedMode,
    pub bird: Bird,
    pub entities: Vec<Entity>,
    pub pipe_gap: f64,
    pub tick_count: u64,
}

impl GameSession {
    /// Create a session sitting on the start menu, with the opening
    /// obstacles already in place behind the menu.
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let power_up = PowerUpTimer::new(config.power_up_duration);
        let mut session = Self {
            config,
            state: SessionState::NotStarted,
            score: 0,
            lives: MAX_LIVES,
            player_name: String::new(),
            power_up,
            bird: Bird::default(),
            entities: Vec::new(),
            last_input_ms: None,
            tick_count: 0,
            events: Vec::new(),
        };
        spawner::spawn_initial(&mut session.entities, &session.config, rng);
        session
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_invulnerable(&self) -> bool {
        self.power_up.is_invulnerable()
    }

    pub fn power_up(&self) -> &PowerUpTimer {
        &self.power_up
    }

    pub fn speed_mode(&self) -> SpeedMode {
        self.power_up.speed_mode()
    }

    /// Current scroll speed in world units per tick.
    pub fn speed(&self) -> f64 {
        match self.speed_mode() {
            SpeedMode::Normal => self.config.normal_speed,
            SpeedMode::Boosted => self.config.boosted_speed,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            score: self.score,
            lives: self.lives,
            player_name: self.player_name.clone(),
            power_up_active: self.power_up.is_active(),
            power_up_secs_left: self.power_up.remaining_secs_ceil(),
            power_up_duration: self.power_up.duration(),
            speed_mode: self.speed_mode(),
            bird: self.bird,
            entities: self.entities.clone(),
            pipe_gap: self.config.pipe_gap,
            tick_count: self.tick_count,
        }
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Set the player name. Only allowed on the start menu.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        if self.state != SessionState::NotStarted {
            return false;
        }
        self.player_name = name.to_string();
        true
    }

    /// Begin a session from the start menu. Requires a non-empty name.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.state != SessionState::NotStarted {
            return false;
        }
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.player_name = trimmed.to_string();

        self.reset_run(rng);
        self.state = SessionState::Playing;
        self.events.push(GameEvent::Started);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.state = SessionState::Paused;
        self.events.push(GameEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Playing;
        self.events.push(GameEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Flap. Starts the game from the menu and resumes from pause.
    ///
    /// Inputs closer than the cooldown to the previous accepted input are
    /// dropped and do not push the cooldown window forward.
    pub fn primary_input<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        if let Some(last) = self.last_input_ms {
            if now_ms.saturating_sub(last) < self.config.flap_cooldown_ms {
                return false;
            }
        }

        let accepted = match self.state {
            SessionState::NotStarted => self.start(rng),
            SessionState::Paused => self.resume(),
            SessionState::Playing => {
                self.bird.velocity =
                    physics::flap_velocity(self.bird.velocity, self.config.flap_strength);
                self.events.push(GameEvent::Flapped);
                true
            }
            SessionState::Ended => false,
        };

        if accepted {
            self.last_input_ms = Some(now_ms);
        }
        accepted
    }

    /// Lose a life. Ignored while invulnerable or not playing.
    pub fn lose_life(&mut self) -> bool {
        if self.state != SessionState::Playing || self.is_invulnerable() {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost { lives: self.lives });

        if self.lives == 0 {
            self.state = SessionState::Ended;
            self.power_up.deactivate();
            self.events.push(GameEvent::GameOver { score: self.score });
        } else {
            self.bird.reset();
        }
        true
    }

    /// Retry after game over, or restart from the pause menu.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !matches!(self.state, SessionState::Paused | SessionState::Ended) {
            return false;
        }
        self.reset_run(rng);
        self.state = SessionState::Playing;
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Same as [`GameSession::restart`]; the game-over screen calls it "retry".
    pub fn retry<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.restart(rng)
    }

    pub fn return_to_menu(&mut self) -> bool {
        if !matches!(self.state, SessionState::Paused | SessionState::Ended) {
            return false;
        }
        self.entities.clear();
        self.power_up.deactivate();
        self.bird.reset();
        self.score = 0;
        self.lives = MAX_LIVES;
        self.last_input_ms = None;
        self.state = SessionState::NotStarted;
        self.events.push(GameEvent::ReturnedToMenu);
        true
    }

    /// Advance one fixed physics tick, then the power-up countdown.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        if self.state != SessionState::Playing {
            return;
        }
        self.tick_count += 1;
        physics::process_tick(self, rng);

        if self.state == SessionState::Playing && self.power_up.advance(TICK_SECS) {
            self.events.push(GameEvent::PowerUpExpired);
        }
    }

    // ── Physics hooks ──────────────────────────────────────────────────

    pub(crate) fn award_point(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        self.score += 1;
        self.events.push(GameEvent::Scored { score: self.score });
    }

    pub(crate) fn collect_power_up(&mut self) {
        self.power_up.activate();
        self.events.push(GameEvent::PowerUpCollected);
    }

    fn reset_run<R: Rng>(&mut self, rng: &mut R) {
        self.entities.clear();
        spawner::spawn_initial(&mut self.entities, &self.config, rng);
        self.power_up.deactivate();
        self.bird.reset();
        self.score = 0;
        self.lives = MAX_LIVES;
        self.tick_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Obstacle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> (GameSession, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let session = GameSession::new(GameConfig::default(), &mut rng);
        (session, rng)
    }

    fn playing() -> (GameSession, ChaCha8Rng) {
        let (mut s, mut rng) = session();
        s.set_player_name("alice");
        assert!(s.start(&mut rng));
        (s, rng)
    }

    #[test]
    fn test_new_session_defaults() {
        let (s, _) = session();
        assert_eq!(s.state(), SessionState::NotStarted);
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), MAX_LIVES);
        assert_eq!(spawner::obstacle_count(&s.entities), INITIAL_OBSTACLES);
        assert!(!s.is_invulnerable());
    }

    #[test]
    fn test_start_requires_name() {
        let (mut s, mut rng) = session();
        assert!(!s.start(&mut rng));
        s.set_player_name("   ");
        assert!(!s.start(&mut rng));
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_start_trims_name() {
        let (mut s, mut rng) = session();
        s.set_player_name("  bob ");
        assert!(s.start(&mut rng));
        assert_eq!(s.player_name(), "bob");
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_name_frozen_after_start() {
        let (mut s, _) = playing();
        assert!(!s.set_player_name("mallory"));
        assert_eq!(s.player_name(), "alice");
    }

    #[test]
    fn test_pause_resume() {
        let (mut s, _) = playing();
        assert!(!s.resume());
        assert!(s.pause());
        assert_eq!(s.state(), SessionState::Paused);
        assert!(!s.pause());
        assert!(s.resume());
        assert_eq!(s.state(), SessionState::Playing);
    }

    #[test]
    fn test_toggle_pause() {
        let (mut s, _) = playing();
        assert!(s.toggle_pause());
        assert_eq!(s.state(), SessionState::Paused);
        assert!(s.toggle_pause());
        assert_eq!(s.state(), SessionState::Playing);

        let (mut menu, _) = session();
        assert!(!menu.toggle_pause());
    }

    #[test]
    fn test_primary_input_starts_game() {
        let (mut s, mut rng) = session();
        s.set_player_name("carol");
        assert!(s.primary_input(1_000, &mut rng));
        assert_eq!(s.state(), SessionState::Playing);
    }

    #[test]
    fn test_primary_input_without_name_is_ignored() {
        let (mut s, mut rng) = session();
        assert!(!s.primary_input(1_000, &mut rng));
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_primary_input_resumes_from_pause() {
        let (mut s, mut rng) = playing();
        s.pause();
        assert!(s.primary_input(1_000, &mut rng));
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.bird.velocity, 0.0);
    }

    #[test]
    fn test_flap_debounce() {
        let (mut s, mut rng) = playing();
        s.drain_events();

        assert!(s.primary_input(1_000, &mut rng));
        assert!(!s.primary_input(1_100, &mut rng));
        // Dropped input did not move the window.
        assert!(s.primary_input(1_150, &mut rng));

        let flaps = s
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Flapped)
            .count();
        assert_eq!(flaps, 2);
    }

    #[test]
    fn test_flap_ignored_when_ended() {
        let (mut s, mut rng) = playing();
        for _ in 0..MAX_LIVES {
            s.lose_life();
        }
        assert_eq!(s.state(), SessionState::Ended);
        assert!(!s.primary_input(10_000, &mut rng));
        assert_eq!(s.state(), SessionState::Ended);
    }

    #[test]
    fn test_lose_life_resets_bird() {
        let (mut s, _) = playing();
        s.bird.y = 4.0;
        s.bird.velocity = 0.3;
        assert!(s.lose_life());
        assert_eq!(s.lives(), 2);
        assert_eq!(s.bird, Bird::default());
        assert_eq!(s.state(), SessionState::Playing);
    }

    #[test]
    fn test_last_life_ends_game() {
        let (mut s, _) = playing();
        s.lives = 1;
        s.score = 7;
        s.drain_events();
        assert!(s.lose_life());
        assert_eq!(s.lives(), 0);
        assert_eq!(s.state(), SessionState::Ended);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::LifeLost { lives: 0 }, GameEvent::GameOver { score: 7 }]
        );
    }

    #[test]
    fn test_lose_life_ignored_when_invulnerable() {
        let (mut s, _) = playing();
        s.collect_power_up();
        assert!(!s.lose_life());
        assert_eq!(s.lives(), MAX_LIVES);
    }

    #[test]
    fn test_game_over_clears_power_up() {
        let (mut s, _) = playing();
        s.lives = 1;
        s.lose_life();
        assert_eq!(s.speed_mode(), SpeedMode::Normal);
        assert!(!s.power_up().is_active());
    }

    #[test]
    fn test_restart_only_from_paused_or_ended() {
        let (mut s, mut rng) = playing();
        assert!(!s.restart(&mut rng));

        s.score = 4;
        s.lives = 1;
        s.collect_power_up();
        s.entities.clear();
        s.pause();
        assert!(s.restart(&mut rng));

        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), MAX_LIVES);
        assert!(!s.is_invulnerable());
        assert!((s.speed() - NORMAL_SPEED).abs() < f64::EPSILON);
        assert_eq!(spawner::obstacle_count(&s.entities), INITIAL_OBSTACLES);
    }

    #[test]
    fn test_retry_after_game_over() {
        let (mut s, mut rng) = playing();
        s.lives = 1;
        s.lose_life();
        assert!(s.retry(&mut rng));
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.lives(), MAX_LIVES);
    }

    #[test]
    fn test_return_to_menu() {
        let (mut s, _) = playing();
        assert!(!s.return_to_menu());

        s.score = 3;
        s.pause();
        assert!(s.return_to_menu());
        assert_eq!(s.state(), SessionState::NotStarted);
        assert!(s.entities.is_empty());
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), MAX_LIVES);
        // Name kept for the next run, editable again.
        assert_eq!(s.player_name(), "alice");
        assert!(s.set_player_name("dave"));
    }

    #[test]
    fn test_start_after_menu_respawns_obstacles() {
        let (mut s, mut rng) = playing();
        s.pause();
        s.return_to_menu();
        assert!(s.start(&mut rng));
        assert_eq!(spawner::obstacle_count(&s.entities), INITIAL_OBSTACLES);
    }

    #[test]
    fn test_score_only_while_playing() {
        let (mut s, _) = playing();
        s.pause();
        s.award_point();
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_tick_counts_down_power_up() {
        let (mut s, mut rng) = playing();
        s.entities.clear();
        s.collect_power_up();
        let before = s.power_up().remaining_secs();
        s.tick(&mut rng);
        assert!(s.power_up().remaining_secs() < before);
    }

    #[test]
    fn test_power_up_expires_during_ticks() {
        let (mut s, mut rng) = playing();
        s.entities.clear();
        s.collect_power_up();
        s.drain_events();

        let ticks = (POWER_UP_DURATION_SECS / TICK_SECS).ceil() as usize + 2;
        for _ in 0..ticks {
            // Keep the bird hovering in the middle.
            s.bird.y = 0.0;
            s.bird.velocity = 0.0;
            s.tick(&mut rng);
        }

        assert!(!s.is_invulnerable());
        assert!((s.speed() - NORMAL_SPEED).abs() < f64::EPSILON);
        assert!(s.drain_events().contains(&GameEvent::PowerUpExpired));
    }

    #[test]
    fn test_paused_tick_is_frozen() {
        let (mut s, mut rng) = playing();
        s.pause();
        let before = s.snapshot();
        s.tick(&mut rng);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut s, _) = playing();
        s.entities = vec![Entity::Obstacle(Obstacle::new(1.0, 0.0, PIPE_GAP))];
        s.collect_power_up();
        let snap = s.snapshot();
        assert_eq!(snap.state, SessionState::Playing);
        assert_eq!(snap.player_name, "alice");
        assert!(snap.power_up_active);
        assert_eq!(snap.power_up_secs_left, 5);
        assert_eq!(snap.power_up_duration, POWER_UP_DURATION_SECS);
        assert_eq!(snap.speed_mode, SpeedMode::Boosted);
        assert_eq!(snap.entities.len(), 1);
    }

    #[test]
    fn test_snapshot_uses_configured_power_up_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = GameConfig {
            power_up_duration: 8.0,
            ..GameConfig::default()
        };
        let mut s = GameSession::new(config, &mut rng);
        s.set_player_name("alice");
        s.start(&mut rng);
        s.collect_power_up();

        let snap = s.snapshot();
        assert_eq!(snap.power_up_duration, 8.0);
        assert_eq!(snap.power_up_secs_left, 8);
    }
}
