//! Gravity well pull
//!
//! Inverse-square attraction toward the well:
//! `F = G * M * m / max(r, min_distance)^2`, applied to velocity as `F / m * dt`,
//! so the body's mass acts as its inertia and the resulting acceleration only
//! depends on the well. Distances are clamped so a body sitting exactly on the
//! well gets a finite (zero-direction) pull instead of NaN.

use glam::Vec3;

use crate::config::WellConfig;

/// Velocity change for a body of `mass` at `pos` over `dt`
pub fn pull(well_pos: Vec3, well_mass: f32, pos: Vec3, mass: f32, config: &WellConfig, dt: f32) -> Vec3 {
    let offset = well_pos - pos;
    let r = offset.length().max(config.min_distance);
    let force = config.gravity_constant * well_mass * mass / (r * r);
    offset.normalize_or_zero() * (force / mass) * dt
}
