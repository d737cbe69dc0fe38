//! Vertex and mesh buffers

use bytemuck::{Pod, Zeroable};

/// Vertex with 3D position and RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }
}

/// Indexed triangle list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// Raw vertex buffer contents for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index buffer contents for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Colors for game elements
pub mod colors {
    pub const SHIP_BODY: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const SHIP_TAIL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const AMMO: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ASTEROID: [f32; 4] = [0.75, 0.75, 0.75, 1.0];
    pub const WELL: [f32; 4] = [1.0, 0.9, 0.2, 1.0];
}
