//! Temporary speed boost + invulnerability buff.
//!
//! The countdown is driven by the physics tick delta rather than a wall-clock
//! timer, so it is deterministic and pauses whenever the game does.

use super::types::SpeedMode;
use crate::constants::POWER_UP_DURATION_SECS;

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpTimer {
    duration: f64,
    remaining: f64,
    active: bool,
}

impl Default for PowerUpTimer {
    fn default() -> Self {
        Self::new(POWER_UP_DURATION_SECS)
    }
}

impl PowerUpTimer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            remaining: 0.0,
            active: false,
        }
    }

    /// Start the buff. Collecting again while active resets the countdown
    /// to the full duration.
    pub fn activate(&mut self) {
        self.active = true;
        self.remaining = self.duration;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    /// Advance the countdown by `dt` seconds. Returns true if the buff
    /// expired during this call.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.deactivate();
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Collisions are ignored while the buff is up.
    pub fn is_invulnerable(&self) -> bool {
        self.active
    }

    pub fn speed_mode(&self) -> SpeedMode {
        if self.active {
            SpeedMode::Boosted
        } else {
            SpeedMode::Normal
        }
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining.max(0.0)
    }

    /// Whole seconds left, rounded up, for the HUD.
    pub fn remaining_secs_ceil(&self) -> u32 {
        self.remaining_secs().ceil() as u32
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let timer = PowerUpTimer::default();
        assert!(!timer.is_active());
        assert!(!timer.is_invulnerable());
        assert_eq!(timer.speed_mode(), SpeedMode::Normal);
        assert_eq!(timer.remaining_secs_ceil(), 0);
    }

    #[test]
    fn test_activate_boosts() {
        let mut timer = PowerUpTimer::default();
        timer.activate();
        assert!(timer.is_invulnerable());
        assert_eq!(timer.speed_mode(), SpeedMode::Boosted);
        assert_eq!(timer.remaining_secs_ceil(), 5);
    }

    #[test]
    fn test_expires_after_duration() {
        let mut timer = PowerUpTimer::new(1.0);
        timer.activate();

        let mut expired_at = None;
        for i in 0..20 {
            if timer.advance(0.1) {
                expired_at = Some(i);
                break;
            }
        }

        // 1.0s at 0.1s steps: the tenth step (or the one after, for float drift)
        let step = expired_at.expect("timer should expire");
        assert!(step == 9 || step == 10, "expired at step {}", step);
        assert!(!timer.is_active());
        assert_eq!(timer.speed_mode(), SpeedMode::Normal);
    }

    #[test]
    fn test_reactivate_resets_to_full() {
        let mut timer = PowerUpTimer::new(5.0);
        timer.activate();
        timer.advance(3.0);
        assert_eq!(timer.remaining_secs_ceil(), 2);

        timer.activate();
        assert!((timer.remaining_secs() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_inactive_is_noop() {
        let mut timer = PowerUpTimer::default();
        assert!(!timer.advance(10.0));
        assert!(!timer.is_active());
    }

    #[test]
    fn test_deactivate_restores_normal_speed() {
        let mut timer = PowerUpTimer::default();
        timer.activate();
        timer.deactivate();
        assert_eq!(timer.speed_mode(), SpeedMode::Normal);
        assert_eq!(timer.remaining_secs(), 0.0);
    }
}
