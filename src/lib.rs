//! Drift Well - an asteroid-belt arcade simulation around a gravity well
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pool, movement, collisions, gravity, camera, clock)
//! - `mesh`: Opaque render payloads carried on each entity
//! - `config`: Start-time configuration and validation

pub mod config;
pub mod mesh;
pub mod sim;

pub use config::{ConfigError, SimConfig, TurnDirection};
pub use sim::{InputSnapshot, Simulation, Symbol, Telemetry};

/// Game configuration constants
pub mod consts {
    /// Rate of the external frame timer
    pub const TICK_RATE: f32 = 35.0;
    /// Nominal elapsed time of one tick at `TICK_RATE`
    pub const TICK_DT: f32 = 1.0 / TICK_RATE;

    /// Map dimensions
    pub const MAP_WIDTH: f32 = 1200.0;
    pub const MAP_HEIGHT: f32 = 800.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 640.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;

    /// Ship movement
    pub const ROTATE_SPEED: f32 = 360.0; // degrees per second
    pub const MAX_SPEED: f32 = 240.0;
    pub const MAX_THRUST: f32 = 180.0;
    pub const DECELERATION_RATE: f32 = 20.0;
    pub const ACCELERATION_RATE: f32 = MAX_THRUST / 2.0;

    /// Ship body
    pub const SHIP_RADIUS: f32 = 5.0;
    pub const SHIP_MASS: f32 = 300.0;
    pub const SHIP_SHIELD: f32 = 100.0;
    pub const SHIP_START: [f32; 2] = [-200.0, -60.0];
    /// Impulse pushing the ship backwards when it fires
    pub const SHIP_RECOIL: f32 = 3.0;

    /// Ammo
    pub const AMMO_POOL_SIZE: usize = 100;
    pub const AMMO_SPEED: f32 = 300.0;
    pub const AMMO_LIFESPAN: f32 = 2.0;
    pub const AMMO_RADIUS: f32 = 3.0;
    pub const AMMO_DAMAGE: f32 = 10.0;
    pub const AMMO_MASS: f32 = 1000.0;

    /// Asteroids
    pub const ASTEROID_SIZE_MIN: f32 = 20.0;
    pub const ASTEROID_SIZE_MAX: f32 = 40.0;
    pub const ASTEROID_LIMIT: usize = 30;
    pub const ASTEROID_DRIFT_SPEED: f32 = 60.0;
    pub const ASTEROID_WORTH: f32 = 20.0;
    pub const ASTEROID_SPAWN_TIME: f32 = 1.0;
    /// Spin in degrees per second is this divided by the radius
    pub const ASTEROID_SPIN: f32 = 1000.0;
    /// Flat bonus added to every asteroid kill
    pub const KILL_BONUS: u64 = 10;

    /// Gravity well
    pub const WELL_MASS: f32 = 1.0e4;
    pub const WELL_DAMAGE: f32 = 1.0e4;
    pub const WELL_RADIUS: f32 = 5.0;
    /// Gravitational constant for the inverse-square pull
    pub const GRAVITY_CONSTANT: f32 = 180.0;
    /// Distances below this are clamped before the inverse-square division
    pub const GRAVITY_MIN_DISTANCE: f32 = 10.0;

    /// Camera
    pub const EDGE_TOLERANCE: f32 = 200.0;
    pub const CAMERA_HEIGHT: f32 = 9.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Wrap a single coordinate to the opposite edge once it leaves `[-half, half]`
#[inline]
pub fn wrap_coordinate(value: f32, half: f32) -> f32 {
    if value > half {
        -half
    } else if value < -half {
        half
    } else {
        value
    }
}
