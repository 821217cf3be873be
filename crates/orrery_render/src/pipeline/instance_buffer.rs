//! Growable GPU buffer of per-instance data

use std::marker::PhantomData;

use bytemuck::Pod;

/// Smallest capacity allocated, in instances
const MIN_CAPACITY: usize = 16;

/// Vertex buffer that is rewritten every frame and reallocated only when
/// the instance count outgrows it
pub struct InstanceBuffer<T: Pod> {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            len: 0,
            _marker: PhantomData,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents with `instances`
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[T]) {
        if instances.len() > self.capacity {
            self.capacity = grown_capacity(instances.len());
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("{} grown to {} instances", self.label, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }

    /// Number of instances written last
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Capacity to allocate for `needed` instances
fn grown_capacity(needed: usize) -> usize {
    needed.next_power_of_two().max(MIN_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(1), MIN_CAPACITY);
        assert_eq!(grown_capacity(17), 32);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
    }
}
