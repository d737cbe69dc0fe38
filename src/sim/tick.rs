//! Fixed-step simulation tick
//!
//! One call advances the whole world by `dt` in a fixed order:
//! gravity and well contact, asteroid belt, ships, projectiles, camera.

use std::collections::HashSet;

use glam::Vec2;

use super::belt;
use super::collision;
use super::entity::{Projectile, Ship, Steppable};
use super::gravity;
use super::movement;
use super::pool::EntityPool;
use super::state::SimulationState;
use super::vector;
use crate::config::SimConfig;

/// Logical input symbols; mapping device codes to these is the caller's job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
    /// Start when stopped, otherwise pause/unpause
    Pause,
}

/// Input state for a single tick
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: HashSet<Symbol>,
    pressed: HashSet<Symbol>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `symbol` as held down
    pub fn hold(&mut self, symbol: Symbol) -> &mut Self {
        self.held.insert(symbol);
        self
    }

    /// Mark `symbol` as pressed this tick (a press is also held)
    pub fn press(&mut self, symbol: Symbol) -> &mut Self {
        self.pressed.insert(symbol);
        self.held.insert(symbol);
        self
    }

    pub fn with_held(mut self, symbol: Symbol) -> Self {
        self.hold(symbol);
        self
    }

    pub fn with_pressed(mut self, symbol: Symbol) -> Self {
        self.press(symbol);
        self
    }

    pub fn is_held(&self, symbol: Symbol) -> bool {
        self.held.contains(&symbol)
    }

    pub fn was_pressed(&self, symbol: Symbol) -> bool {
        self.pressed.contains(&symbol)
    }

    /// +1 turning right, -1 turning left, 0 for neither or both
    pub fn turn_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_held(Symbol::TurnRight) {
            axis += 1.0;
        }
        if self.is_held(Symbol::TurnLeft) {
            axis -= 1.0;
        }
        axis
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub score_delta: u64,
    pub asteroids_destroyed: u32,
    pub asteroids_spawned: u32,
    pub shots_fired: u32,
    /// Hazards the ships ran into (asteroids and projectiles)
    pub ship_hits: u32,
    /// Main ship's shield went below zero
    pub ship_destroyed: bool,
}

/// Advance the state by `dt` seconds
pub fn tick(state: &mut SimulationState, config: &SimConfig, input: &InputSnapshot, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    state.time_ticks += 1;

    apply_gravity(state, config, dt);

    outcome.asteroids_spawned = belt::update(
        &mut state.asteroids,
        &mut state.spawn_timer,
        &mut state.rng,
        &config.asteroids,
        &config.world,
        dt,
    );

    update_ships(state, config, input, dt, &mut outcome);
    update_ammo(state, config, dt, &mut outcome);

    state.compact();

    if let Some(target) = state.camera.target.and_then(|id| state.ship(id)) {
        let target = target.body.pos.truncate();
        state.camera.follow(
            target,
            config.world.viewport_half(),
            config.world.map_half(),
            config.camera.edge_tolerance,
        );
    }

    if state.main_ship().is_destroyed() {
        outcome.ship_destroyed = true;
    }
    state.score += outcome.score_delta;
    outcome
}

/// Pull every live entity toward the well, then resolve well contact
fn apply_gravity(state: &mut SimulationState, config: &SimConfig, dt: f32) {
    let well = &state.well;
    let (well_pos, well_mass) = (well.pos(), well.mass());
    let pull = |pos, mass| gravity::pull(well_pos, well_mass, pos, mass, &config.well, dt);

    for asteroid in state.asteroids.iter_mut().filter(|a| a.body.active) {
        asteroid.velocity += pull(asteroid.body.pos, asteroid.body.mass);
        collision::resolve_well_contact(well, asteroid);
    }
    for ship in state.ships.iter_mut().filter(|s| s.body.active) {
        ship.velocity += pull(ship.body.pos, ship.body.mass);
        collision::resolve_well_contact(well, ship);
    }
    for projectile in state.ammo.iter_active_mut() {
        projectile.velocity += pull(projectile.body.pos, projectile.body.mass);
        collision::resolve_well_contact(well, projectile);
    }
}

/// Steer, move, wrap and collide every live ship, then fire for the main ship
fn update_ships(state: &mut SimulationState, config: &SimConfig, input: &InputSnapshot, dt: f32, outcome: &mut TickOutcome) {
    let main_idx = state.main_ship_id().index();
    let half = config.world.map_half();

    for (i, ship) in state.ships.iter_mut().enumerate() {
        if !ship.body.active {
            continue;
        }
        let controlled = i == main_idx;
        if controlled {
            movement::turn(ship, input.turn_axis(), &config.ship, dt);
        }
        // Other ships coast
        movement::thrust_drag(ship, controlled && input.is_held(Symbol::Thrust), &config.ship, dt);
        movement::wrap(&mut ship.body, half);

        outcome.ship_hits += collision::resolve_ship_hazards(ship, &mut state.asteroids, &mut state.ammo);

        // Fire after collisions; the new shot moves before the ship is checked again
        if !controlled {
            continue;
        }
        if !ship.firing && input.was_pressed(Symbol::Fire) {
            if fire(ship, &mut state.ammo, config, half) {
                outcome.shots_fired += 1;
            }
            ship.firing = true;
        } else {
            ship.firing = input.is_held(Symbol::Fire);
        }
    }
}

/// Release a projectile from the ship's nose and kick the ship backwards.
///
/// Does nothing but return false while the pool is saturated.
fn fire(ship: &mut Ship, ammo: &mut EntityPool<Projectile>, config: &SimConfig, half: Vec2) -> bool {
    let dir = ship.forward();
    let offset = dir * (ship.body.radius + config.ammo.radius + 1.0);
    let rot = ship.body.rot;
    let pos = ship.body.pos + offset;

    let Some((_, projectile)) = ammo.acquire(|| Projectile::shell(&config.ammo)) else {
        return false;
    };
    projectile.launch(pos, rot, &config.ammo);
    movement::wrap(&mut projectile.body, half);
    log::trace!("Fire! [{:.1}, {:.1}]", pos.x, pos.y);

    ship.velocity = vector::clamp_speed(ship.velocity - dir * config.ship.recoil, config.ship.max_speed);
    true
}

/// Age, move and wrap projectiles, then score hits on the belt
fn update_ammo(state: &mut SimulationState, config: &SimConfig, dt: f32, outcome: &mut TickOutcome) {
    let half = config.world.map_half();
    for projectile in state.ammo.iter_active_mut() {
        // expired slots are back in the pool
        if projectile.age(dt) {
            continue;
        }
        projectile.step(dt);
        movement::wrap(&mut projectile.body, half);

        if let Some(points) =
            collision::resolve_projectile_hit(projectile, &mut state.asteroids, config.asteroids.kill_bonus)
        {
            outcome.score_delta += points;
            outcome.asteroids_destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Asteroid;
    use glam::{Quat, Vec3};

    /// Config with the well tucked away and no spawning so scenarios stay isolated
    fn quiet_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.well.position = [590.0, 390.0];
        config.well.gravity_constant = 0.0;
        config.asteroids.spawn_interval = 1.0e9;
        config
    }

    fn state_with_ship_at(config: &mut SimConfig, x: f32, y: f32) -> SimulationState {
        config.ship.start = [x, y];
        SimulationState::new(config).unwrap()
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);

        let press = InputSnapshot::new().with_pressed(Symbol::Fire);
        let hold = InputSnapshot::new().with_held(Symbol::Fire);
        let idle = InputSnapshot::new();

        assert_eq!(tick(&mut state, &config, &press, 0.01).shots_fired, 1);
        // still held: no new shot even if the press flag repeats
        assert_eq!(tick(&mut state, &config, &hold, 0.01).shots_fired, 0);
        assert_eq!(tick(&mut state, &config, &press, 0.01).shots_fired, 0);
        assert_eq!(tick(&mut state, &config, &idle, 0.01).shots_fired, 0);
        assert_eq!(tick(&mut state, &config, &press, 0.01).shots_fired, 1);
        assert_eq!(state.ammo.active_count(), 2);
    }

    #[test]
    fn test_fire_spawns_ahead_with_recoil() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);
        let press = InputSnapshot::new().with_pressed(Symbol::Fire);
        tick(&mut state, &config, &press, 0.0);

        let shot = state.ammo.iter_active().next().unwrap();
        let gap = config.ship.radius + config.ammo.radius + 1.0;
        assert_eq!(shot.body.pos, Vec3::new(0.0, gap, 0.0));
        assert_eq!(shot.velocity, Vec3::Y * config.ammo.speed);
        assert_eq!(state.main_ship().velocity, Vec3::new(0.0, -config.ship.recoil, 0.0));
    }

    #[test]
    fn test_saturated_pool_drops_fire() {
        let mut config = quiet_config();
        config.ammo.pool_size = 1;
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);
        let press = InputSnapshot::new().with_pressed(Symbol::Fire);
        let idle = InputSnapshot::new();

        assert_eq!(tick(&mut state, &config, &press, 0.01).shots_fired, 1);
        tick(&mut state, &config, &idle, 0.01);
        let before = state.main_ship().velocity;
        let outcome = tick(&mut state, &config, &press, 0.0);
        assert_eq!(outcome.shots_fired, 0);
        assert_eq!(state.ammo.len(), 1);
        // no recoil without a shot
        assert!(state.main_ship().velocity.abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn test_projectile_expires_after_lifespan() {
        let mut config = quiet_config();
        config.ammo.lifespan = 2.0;
        config.ammo.speed = 0.0;
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);

        tick(&mut state, &config, &InputSnapshot::new().with_pressed(Symbol::Fire), 0.0);
        let idle = InputSnapshot::new();
        for _ in 0..3 {
            tick(&mut state, &config, &idle, 0.5);
            assert_eq!(state.ammo.active_count(), 1);
        }
        tick(&mut state, &config, &idle, 0.5);
        assert_eq!(state.ammo.active_count(), 0);
        assert_eq!(state.ammo.len(), 1);
    }

    #[test]
    fn test_projectile_kill_awards_floor_worth_plus_bonus() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, -300.0, -300.0);

        let mut rock = Asteroid::new(Vec3::new(100.0, 100.0, 0.0), 20.0, &config.asteroids);
        rock.velocity = Vec3::ZERO;
        state.asteroids.push(rock);
        let idle = InputSnapshot::new();
        // age the asteroid to 15.5 s
        for _ in 0..31 {
            tick(&mut state, &config, &idle, 0.5);
        }
        assert_eq!(state.asteroids[0].worth, 4.5);

        let (_, shot) = state.ammo.acquire(|| Projectile::shell(&config.ammo)).unwrap();
        shot.launch(Vec3::new(100.0, 95.0, 0.0), Quat::IDENTITY, &config.ammo);
        let outcome = tick(&mut state, &config, &idle, 0.0);
        assert_eq!(outcome.score_delta, 14);
        assert_eq!(outcome.asteroids_destroyed, 1);
        assert_eq!(state.score, 14);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.ammo.active_count(), 0);
    }

    #[test]
    fn test_ship_collision_damages_and_removes() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);
        let mut rock = Asteroid::new(Vec3::new(8.0, 0.0, 0.0), 30.0, &config.asteroids);
        rock.velocity = Vec3::ZERO;
        state.asteroids.push(rock);

        let outcome = tick(&mut state, &config, &InputSnapshot::new(), 0.01);
        assert_eq!(outcome.ship_hits, 1);
        assert_eq!(state.main_ship().shield, config.ship.shield - 30.0);
        assert!(state.asteroids.is_empty());
        assert!(!outcome.ship_destroyed);
    }

    #[test]
    fn test_well_contact_destroys_ship() {
        let mut config = SimConfig::default();
        config.asteroids.spawn_interval = 1.0e9;
        let mut state = state_with_ship_at(&mut config, 3.0, 0.0);
        let outcome = tick(&mut state, &config, &InputSnapshot::new(), 0.01);
        assert!(outcome.ship_destroyed);
        assert_eq!(state.main_ship().display_shield(), 0.0);
    }

    #[test]
    fn test_gravity_pulls_ship_toward_well() {
        let mut config = SimConfig::default();
        config.asteroids.spawn_interval = 1.0e9;
        let mut state = state_with_ship_at(&mut config, 200.0, 0.0);
        tick(&mut state, &config, &InputSnapshot::new(), 0.1);
        assert!(state.main_ship().body.pos.x < 200.0);
        assert!(state.main_ship().velocity.x < 0.0);
    }

    #[test]
    fn test_camera_follows_main_ship() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, 500.0, 0.0);
        tick(&mut state, &config, &InputSnapshot::new(), 0.0);
        assert_eq!(state.camera.pos, Vec2::new(280.0, 0.0));
    }

    #[test]
    fn test_positions_stay_wrapped() {
        let mut config = quiet_config();
        config.asteroids.spawn_interval = 0.1;
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);
        let input = InputSnapshot::new()
            .with_held(Symbol::Thrust)
            .with_held(Symbol::TurnRight)
            .with_pressed(Symbol::Fire);
        let half = config.world.map_half();
        for _ in 0..400 {
            tick(&mut state, &config, &input, 0.05);
            let ship = state.main_ship();
            assert!(ship.body.pos.x.abs() <= half.x && ship.body.pos.y.abs() <= half.y);
            assert!(ship.speed() <= config.ship.max_speed * (1.0 + 1e-5));
            assert!(belt::all_within(&state.asteroids, half));
            for p in state.ammo.iter_active() {
                assert!(p.body.pos.x.abs() <= half.x && p.body.pos.y.abs() <= half.y);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let config = SimConfig {
            seed: 99999,
            ..Default::default()
        };
        let mut a = SimulationState::new(&config).unwrap();
        let mut b = SimulationState::new(&config).unwrap();
        let inputs = [
            InputSnapshot::new().with_held(Symbol::Thrust),
            InputSnapshot::new().with_pressed(Symbol::Fire),
            InputSnapshot::new().with_held(Symbol::TurnLeft),
            InputSnapshot::new(),
        ];
        for i in 0..200 {
            let input = &inputs[i % inputs.len()];
            let oa = tick(&mut a, &config, input, 1.0 / 35.0);
            let ob = tick(&mut b, &config, input, 1.0 / 35.0);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        assert_eq!(a.main_ship().body.pos, b.main_ship().body.pos);
    }

    #[test]
    fn test_firing_at_speed_never_hits_own_shot() {
        let mut config = quiet_config();
        let mut state = state_with_ship_at(&mut config, 0.0, 0.0);
        state.main_ship_mut().velocity = Vec3::new(0.0, 120.0, 0.0);

        let dt = crate::consts::TICK_DT;
        let press = InputSnapshot::new()
            .with_pressed(Symbol::Fire)
            .with_held(Symbol::Thrust);
        let outcome = tick(&mut state, &config, &press, dt);
        assert_eq!(outcome.shots_fired, 1);
        assert_eq!(outcome.ship_hits, 0);

        // chase the shot at full thrust; it still pulls away
        let hold = InputSnapshot::new()
            .with_held(Symbol::Fire)
            .with_held(Symbol::Thrust);
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &config, &hold, dt).ship_hits, 0);
        }
        assert_eq!(state.main_ship().shield, config.ship.shield);
        assert_eq!(state.ammo.active_count(), 1);
    }

    #[test]
    fn test_inactive_entities_ignore_the_well() {
        let config = SimConfig {
            asteroids: crate::config::AsteroidConfig {
                spawn_interval: 1.0e9,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut state = SimulationState::new(&config).unwrap();

        let mut parked = Ship::new(&config.ship);
        parked.body.active = false;
        let parked_id = state.add_ship(parked, Vec3::new(2.0, 0.0, 0.0));

        let (slot, shot) = state.ammo.acquire(|| Projectile::shell(&config.ammo)).unwrap();
        shot.launch(Vec3::new(-2.0, 0.0, 0.0), Quat::IDENTITY, &config.ammo);
        shot.velocity = Vec3::ZERO;
        state.ammo.release(slot);

        tick(&mut state, &config, &InputSnapshot::new(), 0.1);

        let parked = state.ship(parked_id).unwrap();
        assert_eq!(parked.velocity, Vec3::ZERO);
        assert_eq!(parked.body.pos, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(parked.shield, config.ship.shield);

        let shot = state.ammo.get(slot).unwrap();
        assert!(!shot.body.active);
        assert_eq!(shot.velocity, Vec3::ZERO);
        assert_eq!(shot.body.pos, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_gravity_skips_inactive_asteroids() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config).unwrap();
        let mut rock = Asteroid::new(Vec3::new(30.0, 0.0, 0.0), 20.0, &config.asteroids);
        rock.velocity = Vec3::ZERO;
        rock.worth = 7.0;
        rock.body.active = false;
        state.asteroids.push(rock);
        let live = Asteroid::new(Vec3::new(0.0, 12.0, 0.0), 20.0, &config.asteroids);
        let live_velocity = live.velocity;
        state.asteroids.push(live);

        apply_gravity(&mut state, &config, 0.1);

        assert_eq!(state.asteroids[0].velocity, Vec3::ZERO);
        assert_eq!(state.asteroids[0].worth, 7.0);
        assert_ne!(state.asteroids[1].velocity, live_velocity);
        // the live one overlaps the well and is destroyed by it
        assert!(!state.asteroids[1].body.active);
    }

    #[test]
    fn test_turn_axis_cancels() {
        let both = InputSnapshot::new()
            .with_held(Symbol::TurnLeft)
            .with_held(Symbol::TurnRight);
        assert_eq!(both.turn_axis(), 0.0);
        assert_eq!(InputSnapshot::new().with_held(Symbol::TurnLeft).turn_axis(), -1.0);
    }
}
