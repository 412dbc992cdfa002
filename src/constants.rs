// Game timing constants
pub const TICK_MS: u64 = 16;
pub const TICK_SECS: f64 = TICK_MS as f64 / 1000.0;

// Bird
pub const BIRD_X: f64 = -3.0;
pub const BIRD_SPAWN_Y: f64 = 0.0;
pub const BIRD_SIZE: f64 = 0.8;
pub const ROTATION_PER_VELOCITY: f64 = -0.1;

// Physics (per tick)
pub const GRAVITY: f64 = 0.025;
pub const MAX_FALL_SPEED: f64 = 0.5;
pub const FLAP_STRENGTH: f64 = 0.4;
pub const FLAP_DAMPING: f64 = 0.7;
pub const MAX_RISE_SPEED: f64 = -0.6;
pub const FLAP_COOLDOWN_MS: u64 = 150;

// World bounds
pub const CEILING_Y: f64 = 10.0;
pub const FLOOR_Y: f64 = -10.0;
pub const EXIT_X: f64 = -15.0;

// Obstacles
pub const PIPE_WIDTH: f64 = 2.0;
pub const PIPE_HEIGHT: f64 = 24.0;
pub const PIPE_GAP: f64 = 6.0;
pub const WIDE_PIPE_GAP: f64 = 7.0;
pub const PIPE_DISTANCE: f64 = 15.0;
pub const SPAWN_X: f64 = 15.0;
pub const INITIAL_OBSTACLES: usize = 3;
pub const GAP_CENTER_MIN: f64 = -3.0;
pub const GAP_CENTER_MAX: f64 = 3.0;

// Scroll speed (per tick)
pub const NORMAL_SPEED: f64 = 0.1;
pub const BOOSTED_SPEED: f64 = 0.2;

// Power-ups
pub const POWER_UP_SIZE: f64 = 2.0;
pub const POWER_UP_CHANCE: f64 = 0.3;
pub const POWER_UP_MAX_OFFSET: f64 = 5.0;
pub const POWER_UP_Y_MIN: f64 = -5.0;
pub const POWER_UP_Y_MAX: f64 = 5.0;
pub const POWER_UP_SPIN_MIN: f64 = 0.01;
pub const POWER_UP_SPIN_MAX: f64 = 0.04;
pub const POWER_UP_DURATION_SECS: f64 = 5.0;

// Session
pub const MAX_LIVES: u8 = 3;

// Leaderboard
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const UNKNOWN_USERNAME: &str = "Unknown";
