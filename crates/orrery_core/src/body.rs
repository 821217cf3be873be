//! Celestial bodies
//!
//! A [`Body`] is the static description of a star, planet or moon together
//! with the [`BodyState`] derived from it every frame.

use orrery_math::{mat4, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::orbit::{Orbit, RingSystem, Spin};
use crate::BodyKey;

/// Tracking height used when a body does not specify one
pub const DEFAULT_TRACKING_HEIGHT: f32 = 50.0;

/// What kind of body this is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Emissive body that lights the others
    Star,
    Planet,
    DwarfPlanet,
    /// Satellite of another body
    Moon,
}

impl BodyKind {
    /// Stars are drawn unlit and act as the light source
    pub fn is_emissive(self) -> bool {
        matches!(self, BodyKind::Star)
    }

    /// Whether the number keys can select bodies of this kind
    pub fn is_trackable(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::DwarfPlanet)
    }

    /// Human readable label used in overlay text
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
            BodyKind::DwarfPlanet => "Dwarf planet",
            BodyKind::Moon => "Moon",
        }
    }
}

/// Physical facts shown in the overlay when a body is tracked
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyFacts {
    /// Average orbital speed in km/s
    pub orbital_speed_km_s: f32,
    /// Mass in units of 10^24 kg
    pub mass_1e24_kg: f64,
    /// Surface gravity relative to Earth
    pub gravity_g: f32,
}

impl BodyFacts {
    pub fn new(orbital_speed_km_s: f32, mass_1e24_kg: f64, gravity_g: f32) -> Self {
        Self {
            orbital_speed_km_s,
            mass_1e24_kg,
            gravity_g,
        }
    }
}

/// Per-frame derived state of a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    /// Position relative to the system origin, before the scene rotation
    pub system_position: Vec3,
    /// Position after the scene transform
    pub world_position: Vec3,
    /// Full model matrix for a unit sphere
    pub model: Mat4,
    /// Current orbital angle (0 for bodies without an orbit)
    pub orbit_angle_deg: f32,
    /// Current spin angle
    pub spin_angle_deg: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            system_position: Vec3::ZERO,
            world_position: Vec3::ZERO,
            model: mat4::IDENTITY,
            orbit_angle_deg: 0.0,
            spin_angle_deg: 0.0,
        }
    }
}

/// A star, planet or moon in the solar system
#[derive(Clone, Debug)]
pub struct Body {
    /// Display name, unique within a system
    pub name: String,
    pub kind: BodyKind,
    /// Sphere radius in world units
    pub radius: f32,
    /// Base RGBA colour
    pub color: [f32; 4],
    /// Body this one orbits (None for the star)
    pub parent: Option<BodyKey>,
    pub orbit: Option<Orbit>,
    pub spin: Spin,
    pub rings: Option<RingSystem>,
    pub facts: Option<BodyFacts>,
    /// Camera height above the orbital plane when tracking this body
    pub tracking_height: Option<f32>,
    /// Distance past the orbit the tracking camera sits; the system's
    /// view hint applies when unset
    pub tracking_offset: Option<f32>,
    /// Derived state, refreshed by `SolarSystem::update`
    pub state: BodyState,
}

impl Body {
    /// Create a body with no parent, orbit, spin or rings
    pub fn new(name: impl Into<String>, kind: BodyKind, radius: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            radius,
            color: [1.0, 1.0, 1.0, 1.0],
            parent: None,
            orbit: None,
            spin: Spin::default(),
            rings: None,
            facts: None,
            tracking_height: None,
            tracking_offset: None,
            state: BodyState::default(),
        }
    }

    /// Set the RGB colour (opaque)
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b, 1.0];
        self
    }

    /// Set the RGBA colour
    pub fn with_rgba(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Make this body orbit `parent`
    pub fn orbiting(mut self, parent: BodyKey, orbit: Orbit) -> Self {
        self.parent = Some(parent);
        self.orbit = Some(orbit);
        self
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_rings(mut self, rings: RingSystem) -> Self {
        self.rings = Some(rings);
        self
    }

    pub fn with_facts(mut self, facts: BodyFacts) -> Self {
        self.facts = Some(facts);
        self
    }

    pub fn with_tracking_height(mut self, height: f32) -> Self {
        self.tracking_height = Some(height);
        self
    }

    pub fn with_tracking_offset(mut self, offset: f32) -> Self {
        self.tracking_offset = Some(offset);
        self
    }

    /// Tracking height, falling back to [`DEFAULT_TRACKING_HEIGHT`]
    pub fn tracking_height_or_default(&self) -> f32 {
        self.tracking_height.unwrap_or(DEFAULT_TRACKING_HEIGHT)
    }

    /// Current world-space position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.world_position
    }
}
