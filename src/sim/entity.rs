//! Entity types and their capabilities
//!
//! Every entity embeds a `Body` (position, orientation, extent, mass, active flag)
//! and an opaque `Mesh`. Behaviour is attached through three small traits:
//! - `Steppable`: free drift integration for one tick
//! - `Collidable`: collision body, contact damage and hit handling
//! - `Drawable`: the draw command handed to the renderer

use glam::{Mat4, Quat, Vec3};

use super::movement;
use super::pool::Poolable;
use super::vector;
use crate::config::{AmmoConfig, AsteroidConfig, ShipConfig, WellConfig};
use crate::mesh::{Mesh, shapes};

/// Physical state shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// z is carried for the transform but ignored by physics
    pub pos: Vec3,
    pub rot: Quat,
    pub radius: f32,
    pub mass: f32,
    /// Inactive bodies are logically absent
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec3, radius: f32, mass: f32) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            radius: radius.max(0.0),
            mass,
            active: true,
        }
    }
}

/// What kind of entity a draw command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Well,
    Asteroid,
    Ship,
    Projectile,
}

/// One entity's worth of drawing, passed to the draw callback
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand<'a> {
    pub kind: EntityKind,
    pub position: Vec3,
    pub orientation: Quat,
    pub radius: f32,
    pub mesh: &'a Mesh,
    /// Leading indices of `mesh` to draw
    pub index_count: usize,
}

impl DrawCommand<'_> {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

pub trait Steppable {
    fn step(&mut self, dt: f32);
}

pub trait Collidable {
    fn body(&self) -> &Body;
    /// Damage dealt to whatever this collides with
    fn damage(&self) -> f32;
    /// React to being hit for `damage`
    fn hit(&mut self, damage: f32);
}

pub trait Drawable {
    /// `None` while the entity is inactive
    fn draw_command(&self) -> Option<DrawCommand<'_>>;
}

fn draw_body<'a>(kind: EntityKind, body: &Body, mesh: &'a Mesh, index_count: usize) -> Option<DrawCommand<'a>> {
    body.active.then(|| DrawCommand {
        kind,
        position: body.pos,
        orientation: body.rot,
        radius: body.radius,
        mesh,
        index_count,
    })
}

/// The player craft
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub velocity: Vec3,
    /// Current thrust in `0..=max_thrust`
    pub thrust: f32,
    /// Goes negative when the ship is destroyed
    pub shield: f32,
    /// Fire input was down last tick (weapon releases on the press edge)
    pub firing: bool,
    pub mesh: Mesh,
}

impl Ship {
    pub fn new(config: &ShipConfig) -> Self {
        let [x, y] = config.start;
        Self {
            body: Body::new(Vec3::new(x, y, 0.0), config.radius, config.mass),
            velocity: Vec3::ZERO,
            thrust: 0.0,
            shield: config.shield,
            firing: false,
            mesh: shapes::ship(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        vector::forward(self.body.rot)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Shield value for display, never below zero
    pub fn display_shield(&self) -> f32 {
        self.shield.max(0.0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.shield < 0.0
    }
}

impl Collidable for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn damage(&self) -> f32 {
        0.0
    }

    fn hit(&mut self, damage: f32) {
        self.shield -= damage;
    }
}

impl Drawable for Ship {
    fn draw_command(&self) -> Option<DrawCommand<'_>> {
        // Tail only shows while thrusting
        let count = if self.thrust > 0.0 {
            self.mesh.index_count()
        } else {
            shapes::SHIP_BODY_INDICES
        };
        draw_body(EntityKind::Ship, &self.body, &self.mesh, count)
    }
}

/// A pooled projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub velocity: Vec3,
    /// Seconds remaining
    pub lifespan: f32,
    pub damage: f32,
    pub mesh: Mesh,
}

impl Projectile {
    /// Fresh pool slot; `launch` fills in the flight state
    pub fn shell(config: &AmmoConfig) -> Self {
        Self {
            body: Body::new(Vec3::ZERO, config.radius, config.mass),
            velocity: Vec3::ZERO,
            lifespan: config.lifespan,
            damage: config.damage,
            mesh: shapes::ammo(),
        }
    }

    /// Reinitialize a checked-out slot for a new flight
    pub fn launch(&mut self, pos: Vec3, rot: Quat, config: &AmmoConfig) {
        self.body.pos = pos;
        self.body.rot = rot;
        self.body.active = true;
        self.velocity = vector::forward(rot) * config.speed;
        self.lifespan = config.lifespan;
        self.damage = config.damage;
    }

    /// Burn `dt` of lifespan; deactivates and returns true once it runs out
    pub fn age(&mut self, dt: f32) -> bool {
        self.lifespan -= dt;
        if self.lifespan <= 0.0 {
            self.body.active = false;
            return true;
        }
        false
    }
}

impl Poolable for Projectile {
    fn is_active(&self) -> bool {
        self.body.active
    }

    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

impl Steppable for Projectile {
    fn step(&mut self, dt: f32) {
        movement::drift(&mut self.body, self.velocity, 0.0, dt);
    }
}

impl Collidable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn damage(&self) -> f32 {
        self.damage
    }

    fn hit(&mut self, _damage: f32) {
        self.body.active = false;
    }
}

impl Drawable for Projectile {
    fn draw_command(&self) -> Option<DrawCommand<'_>> {
        draw_body(EntityKind::Projectile, &self.body, &self.mesh, self.mesh.index_count())
    }
}

/// A drifting hazard
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub velocity: Vec3,
    /// Points awarded on destruction; decays over time
    pub worth: f32,
    pub damage: f32,
    /// Degrees per second
    pub spin: f32,
    pub mesh: Mesh,
}

impl Asteroid {
    /// Asteroid of diameter `size` at `pos`, drifting tangentially around the origin
    pub fn new(pos: Vec3, size: f32, config: &AsteroidConfig) -> Self {
        let radius = size / 2.0;
        let spin = if radius > 0.0 { config.spin / radius } else { 0.0 };
        Self {
            body: Body::new(pos, radius, size * 100.0),
            velocity: vector::tangent(pos) * config.drift_speed,
            worth: config.worth,
            damage: size.floor(),
            spin,
            mesh: shapes::asteroid(radius),
        }
    }

    /// Score for destroying this asteroid right now (at least 1)
    pub fn reward(&self) -> u64 {
        self.worth.floor().max(1.0) as u64
    }

    /// Decay worth by one point per second
    pub fn age(&mut self, dt: f32) {
        self.worth -= dt;
    }
}

impl Steppable for Asteroid {
    fn step(&mut self, dt: f32) {
        movement::drift(&mut self.body, self.velocity, self.spin, dt);
    }
}

impl Collidable for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn damage(&self) -> f32 {
        self.damage
    }

    fn hit(&mut self, _damage: f32) {
        self.body.active = false;
    }
}

impl Drawable for Asteroid {
    fn draw_command(&self) -> Option<DrawCommand<'_>> {
        draw_body(EntityKind::Asteroid, &self.body, &self.mesh, self.mesh.index_count())
    }
}

/// The central attracting body
#[derive(Debug, Clone)]
pub struct GravityWell {
    body: Body,
    pub damage: f32,
    pub mesh: Mesh,
}

impl GravityWell {
    pub fn new(config: &WellConfig) -> Self {
        let [x, y] = config.position;
        Self {
            body: Body::new(Vec3::new(x, y, 0.0), config.radius, config.mass),
            damage: config.damage,
            mesh: shapes::well(config.radius),
        }
    }

    pub fn pos(&self) -> Vec3 {
        self.body.pos
    }

    pub fn mass(&self) -> f32 {
        self.body.mass
    }
}

impl Collidable for GravityWell {
    fn body(&self) -> &Body {
        &self.body
    }

    fn damage(&self) -> f32 {
        self.damage
    }

    // The well is immovable and indestructible
    fn hit(&mut self, _damage: f32) {}
}

impl Drawable for GravityWell {
    fn draw_command(&self) -> Option<DrawCommand<'_>> {
        draw_body(EntityKind::Well, &self.body, &self.mesh, self.mesh.index_count())
    }
}
