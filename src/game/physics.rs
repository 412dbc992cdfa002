//! Per-tick physics: gravity, scrolling, scoring and collisions.

use super::session::GameSession;
use super::spawner;
use super::types::{Bird, Entity, SessionState};
use crate::constants::*;
use rand::Rng;

/// Pull the bird down one tick and update its tilt.
pub fn apply_gravity(bird: &mut Bird, gravity: f64, max_fall_speed: f64) {
    bird.velocity += gravity;
    if bird.velocity > max_fall_speed {
        bird.velocity = max_fall_speed;
    }
    bird.y -= bird.velocity;
    bird.rotation = bird.velocity * ROTATION_PER_VELOCITY;
}

/// Velocity after a flap.
///
/// A falling bird gets the full impulse. A bird that is already rising gets
/// a damped push on top of its current speed, capped at `MAX_RISE_SPEED`.
pub fn flap_velocity(current: f64, flap_strength: f64) -> f64 {
    if current > 0.0 {
        -flap_strength
    } else {
        (current - flap_strength * FLAP_DAMPING).max(MAX_RISE_SPEED)
    }
}

/// Run one physics tick. Does nothing unless the session is playing.
pub fn process_tick<R: Rng>(session: &mut GameSession, rng: &mut R) {
    if session.state() != SessionState::Playing {
        return;
    }

    apply_gravity(
        &mut session.bird,
        session.config.gravity,
        session.config.max_fall_speed,
    );

    advance_obstacles(session, rng);
    if session.state() != SessionState::Playing {
        return;
    }

    advance_power_ups(session);
    check_bounds(session);
}

/// Scroll obstacles, award points, test collisions and recycle the ones
/// that left the screen.
fn advance_obstacles<R: Rng>(session: &mut GameSession, rng: &mut R) {
    let speed = session.speed();
    let mut i = 0;

    while i < session.entities.len() {
        let Entity::Obstacle(mut obstacle) = session.entities[i] else {
            i += 1;
            continue;
        };

        obstacle.x -= speed;

        if !obstacle.passed && obstacle.x < session.bird.x {
            obstacle.passed = true;
            session.award_point();
        }
        session.entities[i] = Entity::Obstacle(obstacle);

        if !session.is_invulnerable() && obstacle.hits(&session.bird.bounds()) {
            session.lose_life();
            if session.state() != SessionState::Playing {
                return;
            }
        }

        if obstacle.x < EXIT_X {
            session.entities.remove(i);
            let position = spawner::replacement_position(&session.config);
            spawner::spawn_obstacle(&mut session.entities, position, &session.config, rng);
            continue;
        }

        i += 1;
    }
}

/// Scroll and spin power-ups, collect the one the bird touches.
fn advance_power_ups(session: &mut GameSession) {
    let speed = session.speed();
    let mut i = 0;

    while i < session.entities.len() {
        let Entity::PowerUp(mut power_up) = session.entities[i] else {
            i += 1;
            continue;
        };

        power_up.x -= speed;
        power_up.spin.1 += power_up.rotation_speed;
        power_up.spin.0 += power_up.rotation_speed / 2.0;

        if !power_up.collected && power_up.bounds().intersects(&session.bird.bounds()) {
            power_up.collected = true;
            session.entities.remove(i);
            session.collect_power_up();
            continue;
        }

        if power_up.x < EXIT_X {
            session.entities.remove(i);
            continue;
        }

        session.entities[i] = Entity::PowerUp(power_up);
        i += 1;
    }
}

/// Flying above the ceiling or below the floor costs a life.
fn check_bounds(session: &mut GameSession) {
    if session.is_invulnerable() {
        return;
    }
    let y = session.bird.y;
    if y > CEILING_Y || y < FLOOR_Y {
        session.lose_life();
    }
}
