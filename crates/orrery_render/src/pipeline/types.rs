//! GPU-compatible data types for the orrery pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use orrery_math::mat4;

/// Sphere mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    /// Outward unit normal
    pub normal: [f32; 3],
}

/// Line loop vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

/// Per-instance data for one sphere
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Model matrix for the unit sphere (64 bytes)
    pub model: [[f32; 4]; 4],
    /// RGBA base colour
    pub color: [f32; 4],
    /// x: 1.0 when emissive (unlit), yzw unused
    pub params: [f32; 4],
}

impl BodyInstance {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4], emissive: bool) -> Self {
        Self {
            model,
            color,
            params: [if emissive { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    pub fn is_emissive(&self) -> bool {
        self.params[0] > 0.5
    }
}

/// Per-instance data for one line loop
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    /// Places the unit circle in the world (64 bytes)
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Which sky palette the background shader uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkyPalette {
    /// Black with white stars and a faint blue band
    #[default]
    DeepSpace,
    /// Warm purple nebula
    Nebula,
}

impl SkyPalette {
    /// The other palette
    pub fn toggled(self) -> Self {
        match self {
            SkyPalette::DeepSpace => SkyPalette::Nebula,
            SkyPalette::Nebula => SkyPalette::DeepSpace,
        }
    }

    fn shader_index(self) -> f32 {
        match self {
            SkyPalette::DeepSpace => 0.0,
            SkyPalette::Nebula => 1.0,
        }
    }
}

/// Per-frame uniforms shared by every pipeline
/// Layout: 176 bytes total (must match the `Frame` struct in the shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position, w unused (16 bytes)
    pub camera_pos: [f32; 4],
    /// Light position, w = 1 when a light exists (16 bytes)
    pub light_pos: [f32; 4],
    /// ambient, diffuse, specular strength, shininess (16 bytes)
    pub lighting: [f32; 4],
    /// Camera right, w = tan(fov/2) * aspect (16 bytes)
    pub cam_right: [f32; 4],
    /// Camera up, w = tan(fov/2) (16 bytes)
    pub cam_up: [f32; 4],
    /// Camera front, w = elapsed seconds (16 bytes)
    pub cam_front: [f32; 4],
    /// palette index, star density, star brightness, unused (16 bytes)
    pub sky: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            camera_pos: [0.0, 0.0, 0.0, 1.0],
            light_pos: [0.0, 0.0, 0.0, 0.0],
            lighting: [0.2, 1.0, 1.0, 50.0],
            cam_right: [1.0, 0.0, 0.0, 1.0],
            cam_up: [0.0, 1.0, 0.0, 1.0],
            cam_front: [0.0, 0.0, -1.0, 0.0],
            sky: [0.0, 0.5, 1.0, 0.0],
        }
    }
}

impl FrameUniforms {
    /// Set the sky palette
    pub fn with_palette(mut self, palette: SkyPalette) -> Self {
        self.sky[0] = palette.shader_index();
        self
    }
}
