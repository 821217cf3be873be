//! Rendering pipeline components
//!
//! Three render pipelines share one per-frame uniform buffer and one depth
//! buffer: the sky is drawn first, then the lit spheres, then the guide
//! loops on top.

pub mod types;
pub mod frame;
pub mod instance_buffer;
pub mod sky_pipeline;
pub mod body_pipeline;
pub mod line_pipeline;

// Re-export types
pub use types::{MeshVertex, LineVertex, BodyInstance, LineInstance, FrameUniforms, SkyPalette};

// Re-export pipelines
pub use frame::{FrameResources, DEPTH_FORMAT};
pub use instance_buffer::InstanceBuffer;
pub use sky_pipeline::SkyPipeline;
pub use body_pipeline::BodyPipeline;
pub use line_pipeline::{LinePipeline, ORBIT_SEGMENTS};
