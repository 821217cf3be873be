//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`) so they can be written to a
//! uniform buffer and read as `mat4x4<f32>` without transposing. Composition
//! follows the fixed-function convention: `mul(a, b)` applies `b` first, so a
//! chain of `translate -> rotate -> scale` reads left to right exactly like a
//! sequence of `glTranslatef`/`glRotatef`/`glScalef` calls.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Multiply a chain of matrices left to right
pub fn mul_all(matrices: &[Mat4]) -> Mat4 {
    matrices.iter().fold(IDENTITY, |acc, m| mul(acc, *m))
}

/// Translation matrix
pub fn translation(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = v.x;
    m[3][1] = v.y;
    m[3][2] = v.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = v.x;
    m[1][1] = v.y;
    m[2][2] = v.z;
    m
}

/// Uniform scale matrix
pub fn uniform_scale(s: f32) -> Mat4 {
    scale(Vec3::new(s, s, s))
}

/// Rotation about the X axis (radians)
pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis (radians)
pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Z axis (radians)
pub fn rotation_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Transform a point (w = 1) by an affine matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a matrix
pub fn transform_vector(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}

/// Translation column of an affine matrix
pub fn get_translation(m: Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}

/// Right-handed perspective projection with a 0..1 depth range (wgpu/Vulkan)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * range, -1.0],
        [0.0, 0.0, near * far * range, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    /// Full homogeneous transform with perspective divide
    fn project(m: Mat4, p: Vec3) -> Vec3 {
        let v = transform_point(m, p);
        let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];
        v / w
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform_point(IDENTITY, p), p);
    }

    #[test]
    fn test_rotations_are_counter_clockwise() {
        assert!(vec_approx_eq(transform_point(rotation_x(FRAC_PI_2), Vec3::Y), Vec3::Z));
        assert!(vec_approx_eq(transform_point(rotation_y(FRAC_PI_2), Vec3::Z), Vec3::X));
        assert!(vec_approx_eq(transform_point(rotation_y(FRAC_PI_2), Vec3::X), -Vec3::Z));
        assert!(vec_approx_eq(transform_point(rotation_z(FRAC_PI_2), Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_mul_applies_right_first() {
        // translate(10, 0, 0) * rotate_z(90): rotate then translate
        let m = mul(translation(Vec3::new(10.0, 0.0, 0.0)), rotation_z(FRAC_PI_2));
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 1.0, 0.0)));
    }

    #[test]
    fn test_mul_all_matches_nested_mul() {
        let a = translation(Vec3::new(1.0, 2.0, 3.0));
        let b = rotation_y(0.3);
        let c = uniform_scale(2.0);
        assert_eq!(mul_all(&[a, b, c]), mul(mul(a, b), c));
    }

    #[test]
    fn test_scale() {
        let m = scale(Vec3::new(2.0, 1.0, 3.0));
        assert_eq!(transform_point(m, Vec3::new(1.0, 1.0, 1.0)), Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = translation(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(transform_vector(m, Vec3::X), Vec3::X);
        assert_eq!(get_translation(m), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_look_at_moves_target_in_front() {
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let p = transform_point(view, Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = project(proj, Vec3::new(0.0, 0.0, -1.0));
        let far = project(proj, Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < EPSILON);
        assert!((far.z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_transpose_roundtrip() {
        let m = mul(rotation_x(0.4), translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(transpose(transpose(m)), m);
    }
}
