//! Asteroid belt: spawning and per-tick aging/drift

use glam::{Vec2, Vec3};
use rand::Rng;

use super::entity::{Asteroid, Steppable};
use super::movement;
use crate::config::{AsteroidConfig, WorldConfig};

/// Spawn one asteroid if the belt is below its cap. Returns true if one was added.
pub fn spawn<R: Rng>(asteroids: &mut Vec<Asteroid>, rng: &mut R, config: &AsteroidConfig, world: &WorldConfig) -> bool {
    let live = asteroids.iter().filter(|a| a.body.active).count();
    if live >= config.limit {
        return false;
    }

    let size = if config.size_max > config.size_min {
        rng.random_range(config.size_min..config.size_max)
    } else {
        config.size_min
    };

    // Keep clear of the map edge by a couple of diameters
    let span = (world.map_width - 4.0 * size).min(world.map_height - 4.0 * size);
    let half = (span / 2.0).max(0.0);
    let mut coord = || if half > 0.0 { rng.random_range(-half..half) } else { 0.0 };
    let pos = Vec3::new(coord(), coord(), 0.0);

    log::trace!("New {:.1}m asteroid at [{:.1}, {:.1}]", size, pos.x, pos.y);
    asteroids.push(Asteroid::new(pos, size, config));
    true
}

/// Advance the spawn timer, then age, drift and wrap every live asteroid.
///
/// Returns the number of asteroids spawned this tick.
pub fn update<R: Rng>(
    asteroids: &mut Vec<Asteroid>,
    spawn_timer: &mut f32,
    rng: &mut R,
    config: &AsteroidConfig,
    world: &WorldConfig,
    dt: f32,
) -> u32 {
    let mut spawned = 0;
    *spawn_timer += dt;
    while *spawn_timer >= config.spawn_interval {
        *spawn_timer -= config.spawn_interval;
        spawned += spawn(asteroids, rng, config, world) as u32;
    }

    let half = world.map_half();
    for asteroid in asteroids.iter_mut().filter(|a| a.body.active) {
        asteroid.age(dt);
        asteroid.step(dt);
        movement::wrap(&mut asteroid.body, half);
    }
    spawned
}

/// Every live asteroid within `[-half, half]` on both axes
pub fn all_within(asteroids: &[Asteroid], half: Vec2) -> bool {
    asteroids
        .iter()
        .filter(|a| a.body.active)
        .all(|a| a.body.pos.x.abs() <= half.x && a.body.pos.y.abs() <= half.y)
}
