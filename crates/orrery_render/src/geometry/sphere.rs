//! UV sphere
//!
//! Unit radius, Y up, outward normals, counter-clockwise winding seen from
//! outside. Every body is drawn as an instance of this one mesh.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::pipeline::MeshVertex;

/// Indexed sphere mesh
pub struct SphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Build a unit sphere with `sectors` slices around Y and `stacks` bands
/// from pole to pole
///
/// Values below 3 sectors or 2 stacks are raised to those minimums.
pub fn uv_sphere(sectors: u32, stacks: u32) -> SphereMesh {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);

    let mut vertices = Vec::with_capacity(((sectors + 1) * (stacks + 1)) as usize);
    for i in 0..=stacks {
        // From +pi/2 (north pole) down to -pi/2
        let stack_angle = FRAC_PI_2 - i as f32 * PI / stacks as f32;
        let (y, ring) = stack_angle.sin_cos();
        for j in 0..=sectors {
            let sector_angle = j as f32 * TAU / sectors as f32;
            let (s, c) = sector_angle.sin_cos();
            let p = [ring * s, y, ring * c];
            vertices.push(MeshVertex {
                position: p,
                normal: p,
            });
        }
    }

    let mut indices = Vec::with_capacity((6 * sectors * (stacks - 1)) as usize);
    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;
        for _ in 0..sectors {
            // The first band only has triangles touching the north pole
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            // and the last band only those touching the south pole
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_math::Vec3;

    fn vertex(mesh: &SphereMesh, index: u32) -> Vec3 {
        Vec3::from_array(mesh.vertices[index as usize].position)
    }

    #[test]
    fn test_counts() {
        let mesh = uv_sphere(36, 18);
        assert_eq!(mesh.vertices.len(), 37 * 19);
        assert_eq!(mesh.indices.len(), 6 * 36 * 17);
        assert_eq!(mesh.index_count(), 6 * 36 * 17);
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = uv_sphere(12, 6);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn test_poles() {
        let mesh = uv_sphere(8, 4);
        assert!((mesh.vertices[0].position[1] - 1.0).abs() < 1e-6);
        assert!((mesh.vertices.last().unwrap().position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = uv_sphere(16, 8);
        for tri in mesh.indices.chunks(3) {
            let (a, b, c) = (vertex(&mesh, tri[0]), vertex(&mesh, tri[1]), vertex(&mesh, tri[2]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = uv_sphere(5, 3);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_minimum_resolution() {
        let mesh = uv_sphere(0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.indices.len(), 6 * 3);
    }
}
