//! Renderable geometry - bridges SolarSystem to GPU instance buffers
//!
//! Converts the posed bodies and guide loops of a
//! [`SolarSystem`](orrery_core::SolarSystem) into the per-instance data the
//! pipelines upload each frame.

use orrery_core::{GuideKind, RenderLayers, SolarSystem};
use orrery_math::Vec3;

use crate::camera::Camera3D;
use crate::pipeline::{BodyInstance, FrameUniforms, LineInstance, SkyPalette};

/// Orbit guide colour used when none is configured
pub const DEFAULT_ORBIT_COLOR: [f32; 4] = [0.55, 0.55, 0.6, 0.45];

/// Instance data for one frame
#[derive(Clone, Debug, Default)]
pub struct FrameGeometry {
    /// One instance per visible body
    pub bodies: Vec<BodyInstance>,
    /// One instance per visible orbit or ring loop
    pub lines: Vec<LineInstance>,
    /// World position of the star, if the system has one
    pub light_position: Option<Vec3>,
}

impl FrameGeometry {
    /// Collect instances from a system that has already been updated
    ///
    /// Layers that are switched off contribute nothing. The light position
    /// is reported whether or not bodies are drawn.
    pub fn from_system(system: &SolarSystem, layers: RenderLayers, orbit_color: [f32; 4]) -> Self {
        let bodies = if layers.contains(RenderLayers::BODIES) {
            system
                .iter()
                .map(|(_, body)| BodyInstance::new(body.state.model, body.color, body.kind.is_emissive()))
                .collect()
        } else {
            Vec::new()
        };

        let lines = if layers.intersects(RenderLayers::ORBITS | RenderLayers::RINGS) {
            system
                .guides(orbit_color)
                .into_iter()
                .filter(|guide| match guide.kind {
                    GuideKind::Orbit => layers.contains(RenderLayers::ORBITS),
                    GuideKind::Ring => layers.contains(RenderLayers::RINGS),
                })
                .map(|guide| LineInstance {
                    model: guide.model,
                    color: guide.color,
                })
                .collect()
        } else {
            Vec::new()
        };

        let light_position = system.star().map(|(_, star)| star.state.world_position);

        Self {
            bodies,
            lines,
            light_position,
        }
    }

    /// Build the frame uniforms for `camera`
    pub fn uniforms(
        &self,
        camera: &Camera3D,
        aspect: f32,
        elapsed_secs: f32,
        palette: SkyPalette,
    ) -> FrameUniforms {
        let tan_half = (camera.fov_deg.to_radians() * 0.5).tan();
        let light_pos = match self.light_position {
            Some(p) => p.extend(1.0),
            None => [0.0; 4],
        };

        FrameUniforms {
            view_proj: camera.view_projection(aspect),
            camera_pos: camera.position.extend(1.0),
            light_pos,
            cam_right: camera.right().extend(tan_half * aspect),
            cam_up: camera.up().extend(tan_half),
            cam_front: camera.front().extend(elapsed_secs),
            ..FrameUniforms::default()
        }
        .with_palette(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{Body, BodyKind, Orbit, RingSystem};

    fn ringed_system() -> SolarSystem {
        let mut system = SolarSystem::new("Test");
        let sun = system
            .add_body(Body::new("Sun", BodyKind::Star, 10.0).with_color(1.0, 0.9, 0.2))
            .unwrap();
        let planet = system
            .add_body(
                Body::new("Ringed", BodyKind::Planet, 2.0)
                    .orbiting(sun, Orbit::circular(50.0, 10.0))
                    .with_rings(RingSystem {
                        inner_radius: 3.0,
                        count: 4,
                        spacing: 1.0,
                        gap_index: None,
                        gap_width: 0.0,
                        tilt_deg: 20.0,
                        color: [0.8, 0.7, 0.5, 0.6],
                    }),
            )
            .unwrap();
        system
            .add_body(Body::new("Moon", BodyKind::Moon, 0.5).orbiting(planet, Orbit::circular(5.0, 40.0)))
            .unwrap();
        system.update(1.0);
        system
    }

    #[test]
    fn test_all_layers() {
        let system = ringed_system();
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ALL, DEFAULT_ORBIT_COLOR);
        assert_eq!(geometry.bodies.len(), 3);
        // two orbits plus four rings
        assert_eq!(geometry.lines.len(), 6);
    }

    #[test]
    fn test_only_star_is_emissive() {
        let system = ringed_system();
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ALL, DEFAULT_ORBIT_COLOR);
        let emissive = geometry.bodies.iter().filter(|b| b.is_emissive()).count();
        assert_eq!(emissive, 1);
        assert!(geometry.bodies[0].is_emissive());
    }

    #[test]
    fn test_orbits_hidden_keeps_rings() {
        let system = ringed_system();
        let layers = RenderLayers::ALL - RenderLayers::ORBITS;
        let geometry = FrameGeometry::from_system(&system, layers, DEFAULT_ORBIT_COLOR);
        assert_eq!(geometry.lines.len(), 4);
        assert!(geometry.lines.iter().all(|l| l.color == [0.8, 0.7, 0.5, 0.6]));
    }

    #[test]
    fn test_no_bodies_layer() {
        let system = ringed_system();
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ORBITS, DEFAULT_ORBIT_COLOR);
        assert!(geometry.bodies.is_empty());
        assert_eq!(geometry.lines.len(), 2);
        assert!(geometry.light_position.is_some());
    }

    #[test]
    fn test_light_follows_star() {
        let mut system = ringed_system().with_origin(Vec3::new(0.0, 0.0, -100.0));
        system.update(0.0);
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ALL, DEFAULT_ORBIT_COLOR);
        let light = geometry.light_position.unwrap();
        assert!((light.z + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_system_has_no_light() {
        let system = SolarSystem::new("Empty");
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ALL, DEFAULT_ORBIT_COLOR);
        assert!(geometry.bodies.is_empty());
        assert!(geometry.lines.is_empty());
        assert!(geometry.light_position.is_none());
    }

    #[test]
    fn test_uniforms_carry_light_and_palette() {
        let system = ringed_system();
        let geometry = FrameGeometry::from_system(&system, RenderLayers::ALL, DEFAULT_ORBIT_COLOR);
        let camera = Camera3D::new();
        let uniforms = geometry.uniforms(&camera, 2.0, 3.5, SkyPalette::Nebula);
        assert_eq!(uniforms.light_pos[3], 1.0);
        assert_eq!(uniforms.sky[0], 1.0);
        assert_eq!(uniforms.cam_front[3], 3.5);
        assert!((uniforms.cam_right[3] - 2.0 * uniforms.cam_up[3]).abs() < 1e-6);
    }
}
