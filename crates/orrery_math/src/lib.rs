//! 3D Mathematics Library
//!
//! This crate provides the small amount of vector and matrix math the orrery
//! needs: a [`Vec3`] type and column-major 4x4 matrix helpers in [`mat4`].
//!
//! ## Conventions
//!
//! - Right-handed coordinates, Y up.
//! - Matrices are `[[f32; 4]; 4]` indexed `m[column][row]`, matching the
//!   memory layout WGSL expects for `mat4x4<f32>`.
//! - Rotation helpers take radians and rotate counter-clockwise when looking
//!   down the axis towards the origin.

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Wrap an angle in degrees into `[0, 360)`
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(deg_to_rad(0.0), 0.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }
}
