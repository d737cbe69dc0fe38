//! Simulation state aggregate
//!
//! Everything a tick reads or writes lives in `SimulationState`. The driver owns
//! the only instance, so independent simulations can run side by side.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::entity::{Asteroid, DrawCommand, Drawable, GravityWell, Projectile, Ship};
use super::pool::EntityPool;
use crate::config::{ConfigError, SimConfig};

/// Handle to a ship owned by the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipId(usize);

impl ShipId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Ships are never removed, so every `ShipId` stays valid
    pub(crate) ships: Vec<Ship>,
    main_ship: ShipId,
    pub ammo: EntityPool<Projectile>,
    /// Compacted at the end of every tick; may hold inactive entries mid-tick
    pub asteroids: Vec<Asteroid>,
    pub well: GravityWell,
    pub camera: Camera,
    pub score: u64,
    /// Seconds accumulated toward the next asteroid spawn
    pub spawn_timer: f32,
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl SimulationState {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let main_ship = ShipId(0);
        Ok(Self {
            ships: vec![Ship::new(&config.ship)],
            main_ship,
            ammo: EntityPool::new(config.ammo.pool_size)?,
            asteroids: Vec::with_capacity(config.asteroids.limit),
            well: GravityWell::new(&config.well),
            camera: Camera::new(config.camera.height, Some(main_ship)),
            score: 0,
            spawn_timer: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(config.seed),
        })
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0)
    }

    pub fn main_ship_id(&self) -> ShipId {
        self.main_ship
    }

    pub fn main_ship(&self) -> &Ship {
        &self.ships[self.main_ship.0]
    }

    pub fn main_ship_mut(&mut self) -> &mut Ship {
        &mut self.ships[self.main_ship.0]
    }

    /// Add another ship at `pos`; it coasts unless made the main ship
    pub fn add_ship(&mut self, mut ship: Ship, pos: Vec3) -> ShipId {
        ship.body.pos = pos;
        self.ships.push(ship);
        ShipId(self.ships.len() - 1)
    }

    /// Hand control and the camera to another ship
    pub fn set_main_ship(&mut self, id: ShipId) -> bool {
        if id.0 >= self.ships.len() {
            return false;
        }
        self.main_ship = id;
        self.camera.target = Some(id);
        true
    }

    pub fn active_asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter(|a| a.body.active)
    }

    /// Drop destroyed asteroids; runs after all scans for the tick are done
    pub fn compact(&mut self) {
        self.asteroids.retain(|a| a.body.active);
    }

    /// Invoke `draw` once per active entity: well, asteroids, ships, projectiles
    pub fn draw(&self, mut draw: impl FnMut(&DrawCommand<'_>)) {
        let well = self.well.draw_command();
        let asteroids = self.asteroids.iter().map(Drawable::draw_command);
        let ships = self.ships.iter().map(Drawable::draw_command);
        let ammo = self.ammo.slots().iter().map(Drawable::draw_command);
        for cmd in std::iter::once(well).chain(asteroids).chain(ships).chain(ammo).flatten() {
            draw(&cmd);
        }
    }
}
