//! Render payloads
//!
//! The simulation carries one `Mesh` per entity and hands it back through the
//! draw callback. It never reads the buffers itself.

pub mod shapes;
pub mod vertex;

pub use vertex::{Mesh, Vertex, colors};
