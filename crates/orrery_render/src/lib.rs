//! Orrery Rendering Library
//!
//! This crate provides the wgpu-based pipelines that draw a
//! [`SolarSystem`](orrery_core::SolarSystem).
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera3D`] - orbit/free camera with yaw and pitch
//! - [`pipeline::SkyPipeline`] - procedural starfield background
//! - [`pipeline::BodyPipeline`] - instanced, lit spheres
//! - [`pipeline::LinePipeline`] - orbit guides and ring loops
//! - [`renderable::FrameGeometry`] - converts a system into instance data

pub mod context;
pub mod camera;
pub mod geometry;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use orrery_core::{SolarSystem, Body, BodyKey, RenderLayers};
pub use orrery_math::{Vec3, Mat4};

pub use renderable::{FrameGeometry, DEFAULT_ORBIT_COLOR};
