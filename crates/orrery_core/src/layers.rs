//! Toggleable render layers

use bitflags::bitflags;

bitflags! {
    /// Which parts of the scene are drawn
    ///
    /// Toggled from the keyboard; the renderer skips any layer not set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderLayers: u8 {
        /// Star, planet and moon spheres
        const BODIES = 1 << 0;
        /// Orbit guide loops
        const ORBITS = 1 << 1;
        /// Planetary ring loops
        const RINGS = 1 << 2;
        /// Procedural sky background
        const SKY = 1 << 3;
        const ALL = Self::BODIES.bits() | Self::ORBITS.bits() | Self::RINGS.bits() | Self::SKY.bits();
    }
}

impl Default for RenderLayers {
    fn default() -> Self {
        RenderLayers::ALL
    }
}
