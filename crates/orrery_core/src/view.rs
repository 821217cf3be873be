//! Camera framing hints carried by a system
//!
//! Systems are authored at very different scales, so each one says where the
//! overview camera should start and how far it may zoom.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewHints {
    /// Starting distance of the overview camera from the origin
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Starting azimuth around Y (0 looks from +Z)
    pub azimuth_deg: f32,
    /// Starting elevation above the orbital plane
    pub elevation_deg: f32,
    /// How much further out than the tracked body the camera sits
    pub tracking_offset: f32,
    /// World units per zoom band unit
    pub zoom_unit: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewHints {
    fn default() -> Self {
        Self {
            distance: 515.0,
            min_distance: 150.0,
            max_distance: 3000.0,
            azimuth_deg: 180.0,
            elevation_deg: 29.0,
            tracking_offset: 200.0,
            zoom_unit: 1.0,
            near: 1.0,
            far: 20000.0,
        }
    }
}

impl ViewHints {
    /// Clamp a camera distance into the allowed range
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_distance() {
        let hints = ViewHints::default();
        assert_eq!(hints.clamp_distance(10.0), 150.0);
        assert_eq!(hints.clamp_distance(1e6), 3000.0);
        assert_eq!(hints.clamp_distance(600.0), 600.0);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let hints: ViewHints = ron::from_str("(distance: 30.0, min_distance: 5.0)").unwrap();
        assert_eq!(hints.distance, 30.0);
        assert_eq!(hints.min_distance, 5.0);
        assert_eq!(hints.far, ViewHints::default().far);
    }
}
