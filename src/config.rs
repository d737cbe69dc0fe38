//! Simulation configuration
//!
//! Everything here is fixed at start time. Defaults hold the stock game tuning;
//! a JSON document may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration rejected at setup time
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be at least 1")]
    ZeroCapacity { field: &'static str },
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which way a positive (rightward) turn input rotates the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TurnDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl TurnDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnDirection::Clockwise => "Clockwise",
            TurnDirection::CounterClockwise => "CounterClockwise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clockwise" | "cw" => Some(TurnDirection::Clockwise),
            "counterclockwise" | "counter-clockwise" | "ccw" => {
                Some(TurnDirection::CounterClockwise)
            }
            _ => None,
        }
    }

    /// Sign applied to the turn angle about +Z
    pub fn sign(&self) -> f32 {
        match self {
            TurnDirection::Clockwise => -1.0,
            TurnDirection::CounterClockwise => 1.0,
        }
    }
}

/// Map and viewport extents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub map_width: f32,
    pub map_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl WorldConfig {
    /// Half of the map extents (the wrap boundary)
    pub fn map_half(&self) -> glam::Vec2 {
        glam::Vec2::new(self.map_width / 2.0, self.map_height / 2.0)
    }

    pub fn viewport_half(&self) -> glam::Vec2 {
        glam::Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Degrees per second at full turn input
    pub rotate_speed: f32,
    pub turn_direction: TurnDirection,
    pub max_speed: f32,
    pub max_thrust: f32,
    /// Thrust gained per second while accelerating
    pub acceleration_rate: f32,
    /// Speed lost per second
    pub deceleration_rate: f32,
    pub radius: f32,
    pub mass: f32,
    pub shield: f32,
    pub recoil: f32,
    pub start: [f32; 2],
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            rotate_speed: ROTATE_SPEED,
            turn_direction: TurnDirection::default(),
            max_speed: MAX_SPEED,
            max_thrust: MAX_THRUST,
            acceleration_rate: ACCELERATION_RATE,
            deceleration_rate: DECELERATION_RATE,
            radius: SHIP_RADIUS,
            mass: SHIP_MASS,
            shield: SHIP_SHIELD,
            recoil: SHIP_RECOIL,
            start: SHIP_START,
        }
    }
}

/// Projectile pool tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoConfig {
    pub pool_size: usize,
    pub speed: f32,
    /// Seconds a projectile stays alive
    pub lifespan: f32,
    pub radius: f32,
    pub damage: f32,
    pub mass: f32,
}

impl Default for AmmoConfig {
    fn default() -> Self {
        Self {
            pool_size: AMMO_POOL_SIZE,
            speed: AMMO_SPEED,
            lifespan: AMMO_LIFESPAN,
            radius: AMMO_RADIUS,
            damage: AMMO_DAMAGE,
            mass: AMMO_MASS,
        }
    }
}

/// Asteroid belt tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub size_min: f32,
    pub size_max: f32,
    /// Hard cap on live asteroids
    pub limit: usize,
    pub drift_speed: f32,
    /// Starting worth; decays by one point per second
    pub worth: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub spin: f32,
    pub kill_bonus: u64,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            size_min: ASTEROID_SIZE_MIN,
            size_max: ASTEROID_SIZE_MAX,
            limit: ASTEROID_LIMIT,
            drift_speed: ASTEROID_DRIFT_SPEED,
            worth: ASTEROID_WORTH,
            spawn_interval: ASTEROID_SPAWN_TIME,
            spin: ASTEROID_SPIN,
            kill_bonus: KILL_BONUS,
        }
    }
}

/// Gravity well tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WellConfig {
    pub mass: f32,
    pub damage: f32,
    pub radius: f32,
    pub position: [f32; 2],
    pub gravity_constant: f32,
    pub min_distance: f32,
}

impl Default for WellConfig {
    fn default() -> Self {
        Self {
            mass: WELL_MASS,
            damage: WELL_DAMAGE,
            radius: WELL_RADIUS,
            position: [0.0, 0.0],
            gravity_constant: GRAVITY_CONSTANT,
            min_distance: GRAVITY_MIN_DISTANCE,
        }
    }
}

/// Camera tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Inset from the viewport edge where the camera starts following
    pub edge_tolerance: f32,
    pub height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            edge_tolerance: EDGE_TOLERANCE,
            height: CAMERA_HEIGHT,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the asteroid spawner
    pub seed: u64,
    pub world: WorldConfig,
    pub ship: ShipConfig,
    pub ammo: AmmoConfig,
    pub asteroids: AsteroidConfig,
    pub well: WellConfig,
    pub camera: CameraConfig,
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config (seed {})", config.seed);
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        positive("world.map_width", w.map_width)?;
        positive("world.map_height", w.map_height)?;
        positive("world.viewport_width", w.viewport_width)?;
        positive("world.viewport_height", w.viewport_height)?;

        let s = &self.ship;
        positive("ship.radius", s.radius)?;
        positive("ship.mass", s.mass)?;
        positive("ship.max_speed", s.max_speed)?;
        positive("ship.max_thrust", s.max_thrust)?;
        non_negative("ship.rotate_speed", s.rotate_speed)?;
        non_negative("ship.acceleration_rate", s.acceleration_rate)?;
        non_negative("ship.deceleration_rate", s.deceleration_rate)?;
        non_negative("ship.recoil", s.recoil)?;

        let a = &self.ammo;
        if a.pool_size == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "ammo.pool_size",
            });
        }
        positive("ammo.radius", a.radius)?;
        positive("ammo.mass", a.mass)?;
        positive("ammo.lifespan", a.lifespan)?;
        non_negative("ammo.speed", a.speed)?;
        non_negative("ammo.damage", a.damage)?;

        let b = &self.asteroids;
        positive("asteroids.size_min", b.size_min)?;
        positive("asteroids.size_max", b.size_max)?;
        if b.size_min > b.size_max {
            return Err(ConfigError::InvertedRange {
                field: "asteroids.size",
                min: b.size_min,
                max: b.size_max,
            });
        }
        positive("asteroids.spawn_interval", b.spawn_interval)?;
        non_negative("asteroids.drift_speed", b.drift_speed)?;
        non_negative("asteroids.spin", b.spin)?;

        let g = &self.well;
        positive("well.radius", g.radius)?;
        positive("well.mass", g.mass)?;
        positive("well.min_distance", g.min_distance)?;
        non_negative("well.damage", g.damage)?;
        non_negative("well.gravity_constant", g.gravity_constant)?;

        non_negative("camera.edge_tolerance", self.camera.edge_tolerance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
