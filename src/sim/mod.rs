//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Externally timed ticks, one call runs to completion
//! - Seeded RNG only
//! - Stable iteration order (insertion order for every collection)
//! - No rendering or platform dependencies

pub mod belt;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod gravity;
pub mod movement;
pub mod pool;
pub mod simulation;
pub mod state;
pub mod tick;
pub mod vector;

pub use camera::Camera;
pub use clock::{ClockState, SimulationClock};
pub use entity::{
    Asteroid, Body, Collidable, DrawCommand, Drawable, EntityKind, GravityWell, Projectile, Ship,
    Steppable,
};
pub use pool::{EntityPool, Poolable, SlotId};
pub use simulation::{FrameReport, Simulation, Telemetry};
pub use state::{ShipId, SimulationState};
pub use tick::{InputSnapshot, Symbol, TickOutcome, tick};
