//! Orbital and rotational motion
//!
//! All motion is kinematic: positions and angles are pure functions of the
//! simulated time in seconds. Nothing is integrated, so jumping the clock
//! backwards or forwards always yields the same configuration.

use orrery_math::{deg_to_rad, mat4, wrap_degrees, Vec3};
use serde::{Deserialize, Serialize};

/// Evaluate `phase + speed * t` in f64 and wrap into `[0, 360)`
///
/// Simulated time grows without bound, so the product is formed in double
/// precision before it is reduced.
fn angle_at(phase_deg: f32, speed_deg: f32, t: f64) -> f32 {
    let raw = phase_deg as f64 + speed_deg as f64 * t;
    wrap_degrees(raw.rem_euclid(360.0) as f32)
}

/// An elliptical (or circular) orbit around a parent body
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Extent along X
    pub semi_major: f32,
    /// Extent along Z
    pub semi_minor: f32,
    /// Angular speed in degrees per simulated second
    pub speed_deg: f32,
    /// Angle at t = 0
    #[serde(default)]
    pub phase_deg: f32,
    /// Tilt of the orbital plane about Z
    #[serde(default)]
    pub inclination_deg: f32,
}

impl Orbit {
    /// A circular orbit with the given radius and angular speed
    pub fn circular(radius: f32, speed_deg: f32) -> Self {
        Self::elliptical(radius, radius, speed_deg)
    }

    /// An elliptical orbit with separate X and Z extents
    pub fn elliptical(semi_major: f32, semi_minor: f32, speed_deg: f32) -> Self {
        Self {
            semi_major,
            semi_minor,
            speed_deg,
            phase_deg: 0.0,
            inclination_deg: 0.0,
        }
    }

    /// Set the starting angle
    pub fn with_phase(mut self, phase_deg: f32) -> Self {
        self.phase_deg = phase_deg;
        self
    }

    /// Tilt the orbital plane about Z
    pub fn with_inclination(mut self, inclination_deg: f32) -> Self {
        self.inclination_deg = inclination_deg;
        self
    }

    /// Orbital angle at time `t`, in `[0, 360)`
    pub fn angle_deg(&self, t: f64) -> f32 {
        angle_at(self.phase_deg, self.speed_deg, t)
    }

    /// Offset from the parent at time `t`
    pub fn local_position(&self, t: f64) -> Vec3 {
        self.position_at_angle(self.angle_deg(t), 0.0)
    }

    /// Point on the orbital plane at `angle_deg`, pushed `extra` units
    /// outwards on both axes
    pub fn position_at_angle(&self, angle_deg: f32, extra: f32) -> Vec3 {
        let (s, c) = deg_to_rad(angle_deg).sin_cos();
        let flat = Vec3::new(
            (self.semi_major + extra) * s,
            0.0,
            (self.semi_minor + extra) * c,
        );
        self.tilt_into_plane(flat)
    }

    /// Rotate a point from the flat XZ plane into the inclined orbital plane
    pub fn tilt_into_plane(&self, p: Vec3) -> Vec3 {
        if self.inclination_deg == 0.0 {
            return p;
        }
        mat4::transform_point(mat4::rotation_z(deg_to_rad(self.inclination_deg)), p)
    }

    /// Whether the orbit degenerates to a point
    pub fn is_degenerate(&self) -> bool {
        self.semi_major == 0.0 && self.semi_minor == 0.0
    }
}

/// Rotation of a body about its own (tilted) axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// Tilt of the spin axis about Z
    #[serde(default)]
    pub axial_tilt_deg: f32,
    /// Degrees per simulated second (negative is retrograde)
    #[serde(default)]
    pub rate_deg: f32,
}

impl Spin {
    pub fn new(axial_tilt_deg: f32, rate_deg: f32) -> Self {
        Self { axial_tilt_deg, rate_deg }
    }

    /// Spin angle at time `t`, in `[0, 360)`
    pub fn angle_deg(&self, t: f64) -> f32 {
        angle_at(0.0, self.rate_deg, t)
    }
}

/// Most loops a ring system may have; templates with more are rejected
pub const MAX_RING_COUNT: u32 = 256;

/// Concentric ring loops drawn around a body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingSystem {
    /// Radius of the innermost loop
    pub inner_radius: f32,
    /// Number of loops
    pub count: u32,
    /// Distance between neighbouring loops
    pub spacing: f32,
    /// Index of the loop after which `gap_width` is used instead of `spacing`
    #[serde(default)]
    pub gap_index: Option<u32>,
    /// Width of the gap after `gap_index`
    #[serde(default)]
    pub gap_width: f32,
    /// Tilt of the ring plane about Z
    #[serde(default)]
    pub tilt_deg: f32,
    /// RGBA colour of the loops
    pub color: [f32; 4],
}

impl RingSystem {
    /// Radii of every loop, innermost first (at most [`MAX_RING_COUNT`])
    pub fn radii(&self) -> Vec<f32> {
        let count = self.count.min(MAX_RING_COUNT);
        let mut radii = Vec::with_capacity(count as usize);
        let mut r = self.inner_radius;
        for i in 0..count {
            radii.push(r);
            r += if self.gap_index == Some(i) {
                self.gap_width
            } else {
                self.spacing
            };
        }
        radii
    }

    /// Radius of the outermost loop
    pub fn outer_radius(&self) -> f32 {
        self.radii().last().copied().unwrap_or(self.inner_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_circular_orbit_starts_on_z() {
        let orbit = Orbit::circular(100.0, 10.0);
        let p = orbit.local_position(0.0);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.z, 100.0));
    }

    #[test]
    fn test_quarter_orbit_reaches_x() {
        let orbit = Orbit::circular(100.0, 90.0);
        let p = orbit.local_position(1.0);
        assert!(approx_eq(p.x, 100.0));
        assert!(approx_eq(p.z, 0.0));
    }

    #[test]
    fn test_elliptical_extents() {
        let orbit = Orbit::elliptical(10.0, 5.0, 90.0);
        assert!(approx_eq(orbit.local_position(0.0).z, 5.0));
        assert!(approx_eq(orbit.local_position(1.0).x, 10.0));
    }

    #[test]
    fn test_angle_wraps() {
        let orbit = Orbit::circular(1.0, 100.0);
        assert!(approx_eq(orbit.angle_deg(4.0), 40.0));
        let backwards = Orbit::circular(1.0, -30.0);
        assert!(approx_eq(backwards.angle_deg(1.0), 330.0));
    }

    #[test]
    fn test_angle_stays_precise_at_large_times() {
        let orbit = Orbit::circular(1.0, 387.0);
        // 1e6 seconds is 11.5 days of continuous running
        let angle = orbit.angle_deg(1_000_000.0);
        let expected = (387.0f64 * 1_000_000.0).rem_euclid(360.0) as f32;
        assert!(approx_eq(angle, expected));
    }

    #[test]
    fn test_phase_offsets_angle() {
        let orbit = Orbit::circular(1.0, 0.0).with_phase(45.0);
        assert!(approx_eq(orbit.angle_deg(123.0), 45.0));
    }

    #[test]
    fn test_inclination_lifts_x_component() {
        let orbit = Orbit::circular(10.0, 90.0).with_inclination(90.0);
        // At 90 degrees the body sits on +X, which the Z tilt turns into +Y
        let p = orbit.local_position(1.0);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 10.0));
    }

    #[test]
    fn test_position_at_angle_with_extra() {
        let orbit = Orbit::circular(100.0, 0.0);
        let p = orbit.position_at_angle(0.0, 50.0);
        assert!(approx_eq(p.z, 150.0));
    }

    #[test]
    fn test_spin_retrograde() {
        let spin = Spin::new(23.5, -90.0);
        assert!(approx_eq(spin.angle_deg(1.0), 270.0));
        assert!(approx_eq(spin.angle_deg(0.0), 0.0));
    }

    #[test]
    fn test_ring_radii_with_gap() {
        let rings = RingSystem {
            inner_radius: 55.0,
            count: 25,
            spacing: 1.0,
            gap_index: Some(15),
            gap_width: 3.0,
            tilt_deg: 30.0,
            color: [1.0; 4],
        };
        let radii = rings.radii();
        assert_eq!(radii.len(), 25);
        assert!(approx_eq(radii[0], 55.0));
        assert!(approx_eq(radii[15], 70.0));
        // Cassini division: three units instead of one
        assert!(approx_eq(radii[16], 73.0));
        assert!(approx_eq(radii[24], 81.0));
        assert!(approx_eq(rings.outer_radius(), 81.0));
    }

    #[test]
    fn test_ring_radii_without_gap() {
        let rings = RingSystem {
            inner_radius: 2.0,
            count: 3,
            spacing: 0.5,
            gap_index: None,
            gap_width: 0.0,
            tilt_deg: 0.0,
            color: [1.0; 4],
        };
        assert_eq!(rings.radii(), vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_empty_ring_outer_radius() {
        let rings = RingSystem {
            inner_radius: 2.0,
            count: 0,
            spacing: 0.5,
            gap_index: None,
            gap_width: 0.0,
            tilt_deg: 0.0,
            color: [1.0; 4],
        };
        assert!(rings.radii().is_empty());
        assert_eq!(rings.outer_radius(), 2.0);
    }

    #[test]
    fn test_ring_count_is_capped() {
        let rings = RingSystem {
            inner_radius: 2.0,
            count: u32::MAX,
            spacing: 0.5,
            gap_index: None,
            gap_width: 0.0,
            tilt_deg: 0.0,
            color: [1.0; 4],
        };
        assert_eq!(rings.radii().len(), MAX_RING_COUNT as usize);
    }
}
