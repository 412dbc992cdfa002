//! Flappy Bird world data structures.
//!
//! World space is y-up with the bird at a fixed column. Velocity is measured
//! as fall speed: positive values move the bird down.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    Playing,
    Paused,
    Ended,
}

/// Which scroll speed is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedMode {
    Normal,
    Boosted,
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Box centered on `(x, y)` with the given full width and height.
    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            min_x: x - hw,
            min_y: y - hh,
            max_x: x + hw,
            max_y: y + hh,
        }
    }

    /// Overlap test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// The player's bird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Fall speed per tick (positive = downward).
    pub velocity: f64,
    /// Cosmetic tilt, derived from velocity.
    pub rotation: f64,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_SPAWN_Y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

impl Bird {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.x, self.y, BIRD_SIZE, BIRD_SIZE)
    }

    /// True while moving up or hovering.
    pub fn is_rising(&self) -> bool {
        self.velocity <= 0.0
    }
}

/// A top + bottom barrier pair with a gap between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    /// World y of the gap center.
    pub gap_center: f64,
    /// Gap height, fixed at spawn time.
    pub gap: f64,
    /// Set once when the obstacle scrolls behind the bird.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f64, gap_center: f64, gap: f64) -> Self {
        Self {
            x,
            gap_center,
            gap,
            passed: false,
        }
    }

    pub fn top_bounds(&self) -> Aabb {
        let center = self.gap_center + self.gap / 2.0 + PIPE_HEIGHT / 2.0;
        Aabb::centered(self.x, center, PIPE_WIDTH, PIPE_HEIGHT)
    }

    pub fn bottom_bounds(&self) -> Aabb {
        let center = self.gap_center - self.gap / 2.0 - PIPE_HEIGHT / 2.0;
        Aabb::centered(self.x, center, PIPE_WIDTH, PIPE_HEIGHT)
    }

    /// Lower and upper world y of the gap.
    pub fn gap_span(&self) -> (f64, f64) {
        (
            self.gap_center - self.gap / 2.0,
            self.gap_center + self.gap / 2.0,
        )
    }

    pub fn hits(&self, bird: &Aabb) -> bool {
        self.top_bounds().intersects(bird) || self.bottom_bounds().intersects(bird)
    }
}

/// A collectible that grants a temporary speed boost and invulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub x: f64,
    pub y: f64,
    pub collected: bool,
    /// Cosmetic spin per tick.
    pub rotation_speed: f64,
    /// Cosmetic spin angles (x axis, y axis).
    pub spin: (f64, f64),
}

impl PowerUp {
    pub fn new(x: f64, y: f64, rotation_speed: f64) -> Self {
        Self {
            x,
            y,
            collected: false,
            rotation_speed,
            spin: (0.0, 0.0),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

/// Anything that scrolls toward the bird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Obstacle(Obstacle),
    PowerUp(PowerUp),
}

impl Entity {
    pub fn x(&self) -> f64 {
        match self {
            Entity::Obstacle(o) => o.x,
            Entity::PowerUp(p) => p.x,
        }
    }

    pub fn as_obstacle(&self) -> Option<&Obstacle> {
        match self {
            Entity::Obstacle(o) => Some(o),
            Entity::PowerUp(_) => None,
        }
    }

    pub fn as_power_up(&self) -> Option<&PowerUp> {
        match self {
            Entity::PowerUp(p) => Some(p),
            Entity::Obstacle(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::centered(0.0, 0.0, 2.0, 2.0);
        let b = Aabb::centered(1.5, 0.5, 2.0, 2.0);
        let c = Aabb::centered(5.0, 0.0, 2.0, 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_contains_point() {
        let a = Aabb::centered(0.0, 0.0, 2.0, 4.0);
        assert!(a.contains(1.0, 2.0));
        assert!(!a.contains(1.1, 0.0));
    }

    #[test]
    fn test_aabb_touching_edges_intersect() {
        let a = Aabb::centered(0.0, 0.0, 2.0, 2.0);
        let b = Aabb::centered(2.0, 0.0, 2.0, 2.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_bird_defaults_to_spawn_point() {
        let bird = Bird::default();
        assert!((bird.x - BIRD_X).abs() < f64::EPSILON);
        assert!((bird.y - BIRD_SPAWN_Y).abs() < f64::EPSILON);
        assert_eq!(bird.velocity, 0.0);
        assert!(bird.is_rising());
    }

    #[test]
    fn test_obstacle_halves_frame_the_gap() {
        let obstacle = Obstacle::new(0.0, 1.0, 6.0);
        let (low, high) = obstacle.gap_span();
        assert!((obstacle.top_bounds().min_y - high).abs() < 1e-9);
        assert!((obstacle.bottom_bounds().max_y - low).abs() < 1e-9);
        assert!((obstacle.top_bounds().max_y - (high + PIPE_HEIGHT)).abs() < 1e-9);
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        let obstacle = Obstacle::new(BIRD_X, 0.0, 6.0);
        let bird = Bird::default();
        assert!(!obstacle.hits(&bird.bounds()));
    }

    #[test]
    fn test_bird_above_gap_hits_top() {
        let obstacle = Obstacle::new(BIRD_X, -2.0, 6.0);
        let bird = Bird {
            y: 1.0,
            ..Bird::default()
        };
        assert!(obstacle.top_bounds().intersects(&bird.bounds()));
        assert!(obstacle.hits(&bird.bounds()));
    }

    #[test]
    fn test_entity_accessors() {
        let obstacle = Entity::Obstacle(Obstacle::new(4.0, 0.0, 6.0));
        let power_up = Entity::PowerUp(PowerUp::new(7.0, 1.0, 0.02));
        assert_eq!(obstacle.x(), 4.0);
        assert!(obstacle.as_obstacle().is_some());
        assert!(obstacle.as_power_up().is_none());
        assert_eq!(power_up.x(), 7.0);
        assert!(power_up.as_power_up().is_some());
    }
}
