//! Shape generation for entity meshes

use super::vertex::{Mesh, Vertex, colors};

/// Indices drawn for the ship body alone (tail hidden)
pub const SHIP_BODY_INDICES: usize = 3;

/// Ship: a green triangle pointing +Y with a red thrust tail behind it
pub fn ship() -> Mesh {
    let body = colors::SHIP_BODY;
    let tail = colors::SHIP_TAIL;
    Mesh::new(
        vec![
            Vertex::new(-5.0, -5.0, body),
            Vertex::new(5.0, -5.0, body),
            Vertex::new(0.0, 10.0, body),
            // tail
            Vertex::new(-3.0, -5.0, tail),
            Vertex::new(3.0, -5.0, tail),
            Vertex::new(0.0, -12.0, tail),
        ],
        vec![0, 1, 2, 3, 4, 5],
    )
}

/// Projectile: a small white dart
pub fn ammo() -> Mesh {
    let c = colors::AMMO;
    Mesh::new(
        vec![
            Vertex::new(-2.0, -3.0, c),
            Vertex::new(2.0, -3.0, c),
            Vertex::new(0.0, 3.0, c),
        ],
        vec![0, 1, 2],
    )
}

/// Asteroid: an irregular pentagon fan scaled to `r`
pub fn asteroid(r: f32) -> Mesh {
    let c = colors::ASTEROID;
    Mesh::new(
        vec![
            Vertex::new(0.0, r, c),
            Vertex::new(r, r / 2.0, c),
            Vertex::new(r, -r / 2.0, c),
            Vertex::new(-r / 4.0, -r, c),
            Vertex::new(-r, 0.0, c),
        ],
        vec![0, 1, 2, 0, 2, 3, 0, 3, 4],
    )
}

/// Gravity well: a yellow diamond of radius `r`
pub fn well(r: f32) -> Mesh {
    let c = colors::WELL;
    Mesh::new(
        vec![
            Vertex::new(r, 0.0, c),
            Vertex::new(0.0, r, c),
            Vertex::new(-r, 0.0, c),
            Vertex::new(0.0, -r, c),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}
