//! Orbit and ring guide loops
//!
//! A single unit circle is drawn as a line strip once per
//! [`LineInstance`]; the instance matrix stretches it into an ellipse and
//! places it. Loops are depth tested against the spheres but never write
//! depth, so overlapping guides blend instead of cutting each other.

use wgpu::util::DeviceExt;

use super::frame::DEPTH_FORMAT;
use super::instance_buffer::InstanceBuffer;
use super::types::{LineInstance, LineVertex};
use crate::geometry::unit_circle;

/// Segments in the shared unit circle
pub const ORBIT_SEGMENTS: u32 = 2000;

pub struct LinePipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instances: InstanceBuffer<LineInstance>,
}

impl LinePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[frame_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/line.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout(), Self::instance_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let circle = unit_circle(ORBIT_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Unit Circle Vertex Buffer"),
            contents: bytemuck::cast_slice(&circle),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: circle.len() as u32,
            instances: InstanceBuffer::new(device, "Line Instance Buffer"),
        }
    }

    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
            ],
        }
    }

    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            1 => Float32x4,
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }

    /// Upload this frame's loops
    pub fn update_instances(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[LineInstance]) {
        self.instances.write(device, queue, instances);
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, frame: &'a wgpu::BindGroup) {
        if self.instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, frame, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        pass.draw(0..self.vertex_count, 0..self.instances.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_buffer_layout_stride() {
        let layout = LinePipeline::vertex_buffer_layout();
        assert_eq!(layout.array_stride, 12);
    }

    #[test]
    fn test_instance_layout_covers_instance() {
        let layout = LinePipeline::instance_buffer_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<LineInstance>() as u64);
        let last = layout.attributes.last().unwrap();
        assert_eq!(last.shader_location, 5);
        assert_eq!(last.offset + 16, layout.array_stride);
    }
}
