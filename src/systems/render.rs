//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Sky, body and orbit pipelines sharing one frame uniform
//! - Layer and palette toggles
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use orrery_core::{RenderLayers, SolarSystem};
use orrery_render::{
    camera::Camera3D,
    context::{ContextError, RenderContext},
    geometry::uv_sphere,
    pipeline::{BodyPipeline, FrameResources, LinePipeline, SkyPalette, SkyPipeline},
    FrameGeometry,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// The GPU context could not be created
    Context(ContextError),
    /// Other surface error
    Other(String),
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Context(e) => write!(f, "{}", e),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Layers switched on at startup
fn initial_layers(config: &RenderingConfig) -> RenderLayers {
    let mut layers = RenderLayers::BODIES;
    layers.set(RenderLayers::ORBITS, config.show_orbits);
    layers.set(RenderLayers::RINGS, config.show_rings);
    layers.set(RenderLayers::SKY, config.show_sky);
    layers
}

fn clear_color(bg: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: bg[0] as f64,
        g: bg[1] as f64,
        b: bg[2] as f64,
        a: bg[3] as f64,
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    frame: FrameResources,
    sky_pipeline: SkyPipeline,
    body_pipeline: BodyPipeline,
    line_pipeline: LinePipeline,
    palette: SkyPalette,
    layers: RenderLayers,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut frame = FrameResources::new(&context.device);
        frame.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        let format = context.config.format;
        let sphere = uv_sphere(render_config.sphere_sectors, render_config.sphere_stacks);
        let sky_pipeline = SkyPipeline::new(&context.device, format, frame.bind_group_layout());
        let body_pipeline = BodyPipeline::new(&context.device, format, frame.bind_group_layout(), &sphere);
        let line_pipeline = LinePipeline::new(&context.device, format, frame.bind_group_layout());

        let palette = if render_config.nebula_sky {
            SkyPalette::Nebula
        } else {
            SkyPalette::DeepSpace
        };

        Ok(Self {
            context,
            frame,
            sky_pipeline,
            body_pipeline,
            line_pipeline,
            palette,
            layers: initial_layers(&render_config),
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.frame.ensure_depth_texture(
            &self.context.device,
            self.context.size.width,
            self.context.size.height,
        );
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Swap the sky palette, returning the new one
    pub fn toggle_palette(&mut self) -> SkyPalette {
        self.palette = self.palette.toggled();
        self.palette
    }

    /// Flip a render layer, returning whether it is now shown
    pub fn toggle_layer(&mut self, layer: RenderLayers) -> bool {
        self.layers.toggle(layer);
        self.layers.contains(layer)
    }

    pub fn layers(&self) -> RenderLayers {
        self.layers
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        camera: &Camera3D,
        system: &SolarSystem,
        elapsed_secs: f32,
    ) -> Result<(), RenderError> {
        let geometry = FrameGeometry::from_system(system, self.layers, self.render_config.orbit_color);

        let cfg = &self.render_config;
        let mut uniforms = geometry.uniforms(
            camera,
            self.context.aspect_ratio(),
            elapsed_secs,
            self.palette,
        );
        uniforms.lighting = [
            cfg.ambient_strength,
            cfg.diffuse_strength,
            cfg.specular_strength,
            cfg.shininess,
        ];
        self.frame.update_uniforms(&self.context.queue, &uniforms);

        self.body_pipeline
            .update_instances(&self.context.device, &self.context.queue, &geometry.bodies);
        self.line_pipeline
            .update_instances(&self.context.device, &self.context.queue, &geometry.lines);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = self
            .frame
            .depth_view()
            .ok_or_else(|| RenderError::Other("depth texture missing".to_string()))?;

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(self.render_config.background_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let frame = self.frame.bind_group();
            if self.layers.contains(RenderLayers::SKY) {
                self.sky_pipeline.draw(&mut pass, frame);
            }
            self.body_pipeline.draw(&mut pass, frame);
            self.line_pipeline.draw(&mut pass, frame);
        }

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "No suitable GPU adapter found"
        );
    }

    #[test]
    fn test_initial_layers_follow_config() {
        let config = RenderingConfig::default();
        assert_eq!(initial_layers(&config), RenderLayers::ALL);

        let config = RenderingConfig {
            show_orbits: false,
            show_sky: false,
            ..RenderingConfig::default()
        };
        let layers = initial_layers(&config);
        assert!(layers.contains(RenderLayers::BODIES | RenderLayers::RINGS));
        assert!(!layers.intersects(RenderLayers::ORBITS | RenderLayers::SKY));
    }

    #[test]
    fn test_clear_color() {
        let c = clear_color([0.5, 0.25, 0.0, 1.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 0.0, 1.0));
    }
}
