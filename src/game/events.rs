//! Events produced by session transitions and physics ticks.
//!
//! The presentation layer reads these to flash the HUD and play (or log)
//! sound cues. Game logic never depends on them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    LifeLost { lives: u8 },
    PowerUpCollected,
    PowerUpExpired,
    Paused,
    Resumed,
    Restarted,
    ReturnedToMenu,
    GameOver { score: u32 },
}

/// Audio cue names, matching the sounds the game would play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Flap,
    Score,
    PowerUp,
    Hurt,
    GameOver,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Flap => "flap",
            SoundCue::Score => "score",
            SoundCue::PowerUp => "powerUp",
            SoundCue::Hurt => "hurt",
            SoundCue::GameOver => "gameOver",
        }
    }
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Flapped => Some(SoundCue::Flap),
            GameEvent::Scored { .. } => Some(SoundCue::Score),
            GameEvent::PowerUpCollected => Some(SoundCue::PowerUp),
            GameEvent::LifeLost { .. } => Some(SoundCue::Hurt),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}
