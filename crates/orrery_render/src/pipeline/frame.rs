//! Per-frame GPU state shared by every pipeline
//!
//! Owns the uniform buffer holding [`FrameUniforms`], its bind group and the
//! depth texture sized to the surface.

use wgpu::util::DeviceExt;

use super::types::FrameUniforms;

/// Depth buffer format used by every pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniforms, bind group and depth buffer
pub struct FrameResources {
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl FrameResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                // Frame uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            bind_group_layout,
            uniform_buffer,
            bind_group,
            depth_texture: None,
            depth_size: (0, 0),
        }
    }

    /// Layout every pipeline binds at group 0
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Upload this frame's uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure the depth texture exists and matches the surface size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
            log::debug!("Depth texture resized to {}x{}", width, height);
        }
    }

    /// Depth view, if [`ensure_depth_texture`](Self::ensure_depth_texture) has run
    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_texture.as_ref()
    }
}
