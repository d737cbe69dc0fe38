//! Circle collision detection and resolution
//!
//! Two bodies collide when their centers are strictly closer than the sum of
//! their radii. Resolution never removes anything from a collection while it is
//! being scanned: hit entities are deactivated on the spot (so later checks in
//! the same tick skip them) and the owning collection is compacted afterwards.

use glam::Vec3;

use super::entity::{Asteroid, Collidable, Projectile, Ship};
use super::pool::EntityPool;

/// Strict circle overlap; touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Overlap test between two active collidables
pub fn collides<A: Collidable + ?Sized, B: Collidable + ?Sized>(a: &A, b: &B) -> bool {
    let (a, b) = (a.body(), b.body());
    a.active && b.active && circles_overlap(a.pos, a.radius, b.pos, b.radius)
}

/// Ship against every live asteroid and projectile.
///
/// Each hazard touching the ship deals its damage and is deactivated (asteroids
/// are compacted later, projectiles go back to the pool). Returns the number of
/// hazards absorbed.
pub fn resolve_ship_hazards(ship: &mut Ship, asteroids: &mut [Asteroid], ammo: &mut EntityPool<Projectile>) -> u32 {
    let mut hits = 0;
    for asteroid in asteroids.iter_mut() {
        hits += absorb(ship, asteroid) as u32;
    }
    for projectile in ammo.slots_mut() {
        hits += absorb(ship, projectile) as u32;
    }
    hits
}

fn absorb<H: Collidable>(ship: &mut Ship, hazard: &mut H) -> bool {
    if !collides(&*ship, &*hazard) {
        return false;
    }
    let damage = hazard.damage();
    ship.hit(damage);
    hazard.hit(damage);
    true
}

/// Projectile against the asteroid belt.
///
/// The first live asteroid hit is destroyed along with the projectile; returns
/// the points earned (`reward + bonus`).
pub fn resolve_projectile_hit(projectile: &mut Projectile, asteroids: &mut [Asteroid], bonus: u64) -> Option<u64> {
    let asteroid = asteroids.iter_mut().find(|a| collides(&*projectile, &**a))?;
    let points = asteroid.reward() + bonus;
    log::debug!("Asteroid hit for {} points", asteroid.reward());
    asteroid.hit(projectile.damage);
    projectile.hit(asteroid.damage);
    Some(points)
}

/// Contact between the well and `target`; the target takes the well's damage
pub fn resolve_well_contact<W: Collidable, T: Collidable>(well: &W, target: &mut T) -> bool {
    if !collides(well, &*target) {
        return false;
    }
    target.hit(well.damage());
    true
}
