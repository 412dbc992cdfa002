//! Flappy Bird game core.
//!
//! The bird holds a fixed column while obstacle pairs and power-ups scroll
//! toward it. Gravity pulls it down every tick, a flap pushes it up, and each
//! obstacle cleared scores a point. Hitting an obstacle or leaving the play
//! area costs one of three lives unless a power-up is active.

pub mod events;
pub mod physics;
pub mod power_up;
pub mod session;
pub mod spawner;
pub mod types;

pub use events::{GameEvent, SoundCue};
pub use power_up::PowerUpTimer;
pub use session::{GameSession, SessionSnapshot};
pub use types::*;
