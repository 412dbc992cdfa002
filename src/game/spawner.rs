//! Obstacle and power-up spawning.

use super::types::{Entity, Obstacle, PowerUp};
use crate::config::GameConfig;
use crate::constants::*;
use rand::Rng;

/// Spawn one obstacle at `position` with a random gap center. Sometimes an
/// accompanying power-up appears a little further along.
pub fn spawn_obstacle<R: Rng>(
    entities: &mut Vec<Entity>,
    position: f64,
    config: &GameConfig,
    rng: &mut R,
) {
    let gap_center = rng.gen_range(GAP_CENTER_MIN..GAP_CENTER_MAX);
    entities.push(Entity::Obstacle(Obstacle::new(
        position,
        gap_center,
        config.pipe_gap,
    )));

    if rng.gen_bool(config.power_up_chance.clamp(0.0, 1.0)) {
        let offset = rng.gen_range(0.0..POWER_UP_MAX_OFFSET);
        spawn_power_up(entities, position + offset, rng);
    }
}

/// Spawn one power-up at `position` with a random height and spin.
pub fn spawn_power_up<R: Rng>(entities: &mut Vec<Entity>, position: f64, rng: &mut R) {
    let y = rng.gen_range(POWER_UP_Y_MIN..POWER_UP_Y_MAX);
    let rotation_speed = rng.gen_range(POWER_UP_SPIN_MIN..POWER_UP_SPIN_MAX);
    entities.push(Entity::PowerUp(PowerUp::new(position, y, rotation_speed)));
}

/// Spawn the opening row of obstacles ahead of the bird.
pub fn spawn_initial<R: Rng>(entities: &mut Vec<Entity>, config: &GameConfig, rng: &mut R) {
    for i in 0..INITIAL_OBSTACLES {
        spawn_obstacle(
            entities,
            SPAWN_X + i as f64 * config.pipe_distance,
            config,
            rng,
        );
    }
}

/// Where a replacement obstacle appears after one scrolls off.
pub fn replacement_position(config: &GameConfig) -> f64 {
    SPAWN_X + config.pipe_distance
}

pub fn obstacle_count(entities: &[Entity]) -> usize {
    entities.iter().filter(|e| e.as_obstacle().is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_obstacle_gap_in_range() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut entities = Vec::new();

        for _ in 0..200 {
            spawn_obstacle(&mut entities, 20.0, &config, &mut rng);
        }

        for obstacle in entities.iter().filter_map(Entity::as_obstacle) {
            assert!(obstacle.gap_center >= GAP_CENTER_MIN);
            assert!(obstacle.gap_center < GAP_CENTER_MAX);
            assert!((obstacle.x - 20.0).abs() < f64::EPSILON);
            assert!(!obstacle.passed);
        }
        assert_eq!(obstacle_count(&entities), 200);
    }

    #[test]
    fn test_power_up_chance_roughly_thirty_percent() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut entities = Vec::new();

        for _ in 0..2000 {
            spawn_obstacle(&mut entities, 0.0, &config, &mut rng);
        }

        let power_ups = entities.iter().filter(|e| e.as_power_up().is_some()).count();
        assert!(power_ups > 450 && power_ups < 750, "got {}", power_ups);
    }

    #[test]
    fn test_power_up_offset_within_range() {
        let config = GameConfig {
            power_up_chance: 1.0,
            ..GameConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut entities = Vec::new();

        for _ in 0..100 {
            spawn_obstacle(&mut entities, 10.0, &config, &mut rng);
        }

        for power_up in entities.iter().filter_map(Entity::as_power_up) {
            assert!(power_up.x >= 10.0 && power_up.x < 10.0 + POWER_UP_MAX_OFFSET);
            assert!(power_up.y >= POWER_UP_Y_MIN && power_up.y < POWER_UP_Y_MAX);
            assert!(power_up.rotation_speed >= POWER_UP_SPIN_MIN);
            assert!(power_up.rotation_speed < POWER_UP_SPIN_MAX);
            assert!(!power_up.collected);
        }
    }

    #[test]
    fn test_no_power_ups_when_chance_zero() {
        let config = GameConfig {
            power_up_chance: 0.0,
            ..GameConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut entities = Vec::new();
        for _ in 0..50 {
            spawn_obstacle(&mut entities, 0.0, &config, &mut rng);
        }
        assert_eq!(entities.len(), 50);
    }

    #[test]
    fn test_spawn_initial_spacing() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut entities = Vec::new();
        spawn_initial(&mut entities, &config, &mut rng);

        let xs: Vec<f64> = entities
            .iter()
            .filter_map(Entity::as_obstacle)
            .map(|o| o.x)
            .collect();
        assert_eq!(xs, vec![15.0, 30.0, 45.0]);
    }

    #[test]
    fn test_replacement_position() {
        assert!((replacement_position(&GameConfig::default()) - 30.0).abs() < f64::EPSILON);
    }
}
