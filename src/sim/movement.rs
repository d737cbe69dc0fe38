//! Movement integrators
//!
//! - Thrust/drag for the ship: thrust builds while accelerating, velocity bleeds
//!   off at a constant rate, speed is capped.
//! - Drift for asteroids and projectiles: constant velocity plus optional spin.
//! - Edge wrap: positions leaving the map teleport to the opposite edge.

use glam::{Vec2, Vec3};

use super::entity::{Body, Ship};
use super::vector;
use crate::config::ShipConfig;
use crate::wrap_coordinate;

/// Rotate the ship by `rotate_speed * axis * dt` degrees.
///
/// The new rotation is applied on the left: `rot = q * rot`.
pub fn turn(ship: &mut Ship, axis: f32, config: &ShipConfig, dt: f32) {
    let angle = config.rotate_speed * axis * dt;
    if angle == 0.0 {
        return;
    }
    let q = vector::axis_rotation(Vec3::Z, config.turn_direction.sign() * angle);
    ship.body.rot = (q * ship.body.rot).normalize();
}

/// Advance the ship one tick under the thrust/drag model
pub fn thrust_drag(ship: &mut Ship, accelerate: bool, config: &ShipConfig, dt: f32) {
    ship.thrust = if accelerate {
        (ship.thrust + config.acceleration_rate * dt).min(config.max_thrust)
    } else {
        0.0
    };

    ship.velocity = vector::approach_zero(ship.velocity, config.deceleration_rate * dt);

    if ship.thrust > 0.0 {
        ship.velocity += ship.forward() * ship.thrust * dt;
    }
    ship.velocity = vector::clamp_speed(ship.velocity, config.max_speed);

    ship.body.pos += ship.velocity * dt;
}

/// Constant-velocity translation with `spin` degrees per second about +Z
pub fn drift(body: &mut Body, velocity: Vec3, spin: f32, dt: f32) {
    if spin != 0.0 {
        let q = vector::axis_rotation(Vec3::Z, spin * dt);
        body.rot = (body.rot * q).normalize();
    }
    body.pos += velocity * dt;
}

/// Teleport each of x/y to the opposite edge once it leaves `[-half, half]`
pub fn wrap(body: &mut Body, half: Vec2) {
    body.pos.x = wrap_coordinate(body.pos.x, half.x);
    body.pos.y = wrap_coordinate(body.pos.y, half.y);
}
