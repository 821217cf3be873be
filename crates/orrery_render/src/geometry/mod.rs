//! Procedural meshes

mod sphere;
mod line_loop;

pub use sphere::{uv_sphere, SphereMesh};
pub use line_loop::{unit_circle, FULLSCREEN_TRIANGLE};
