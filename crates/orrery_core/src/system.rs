//! The solar system world
//!
//! [`SolarSystem`] owns every body and recomputes their transforms from the
//! kinematic model each frame. Bodies are stored in a slotmap and updated in
//! insertion order; since a parent must exist before a child is added, that
//! order always visits parents first.

use orrery_math::{deg_to_rad, mat4, wrap_degrees, Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};

use crate::body::{Body, BodyKind};
use crate::overlay::Catalog;
use crate::view::ViewHints;

new_key_type! {
    /// Key to a body in the solar system
    pub struct BodyKey;
}

/// Error raised while assembling a system
#[derive(Debug, Clone, PartialEq)]
pub enum SystemError {
    /// The body names a parent key that is not in this system
    UnknownParent(String),
}

impl std::fmt::Display for SystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemError::UnknownParent(name) => {
                write!(f, "Body '{}' orbits a parent that is not in the system", name)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/// What a guide loop outlines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideKind {
    Orbit,
    Ring,
}

/// A unit circle placed in the world by `model`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLoop {
    pub model: Mat4,
    pub color: [f32; 4],
    pub kind: GuideKind,
}

/// Container for every body plus the user-controlled scene rotation
#[derive(Debug)]
pub struct SolarSystem {
    name: String,
    bodies: SlotMap<BodyKey, Body>,
    /// Insertion order, parents before children
    order: Vec<BodyKey>,
    origin: Vec3,
    /// Scene rotation about Z
    scene_roll_deg: f32,
    /// Scene rotation about X
    scene_pitch_deg: f32,
    time: f64,
    catalog: Catalog,
    view_hints: ViewHints,
}

impl SolarSystem {
    /// Create an empty system
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            origin: Vec3::ZERO,
            scene_roll_deg: 0.0,
            scene_pitch_deg: 0.0,
            time: 0.0,
            catalog: Catalog::default(),
            view_hints: ViewHints::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_view_hints(mut self, hints: ViewHints) -> Self {
        self.view_hints = hints;
        self
    }

    /// Move the whole system (applied after the scene rotation)
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view_hints(&self) -> &ViewHints {
        &self.view_hints
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Simulated time of the last update
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Add a body, returning its key
    ///
    /// Fails if the body's parent is not already part of this system.
    pub fn add_body(&mut self, body: Body) -> Result<BodyKey, SystemError> {
        if let Some(parent) = body.parent {
            if !self.bodies.contains_key(parent) {
                return Err(SystemError::UnknownParent(body.name));
            }
        }
        log::debug!("Adding body '{}' ({:?})", body.name, body.kind);
        let key = self.bodies.insert(body);
        self.order.push(key);
        Ok(key)
    }

    /// Get a body by key
    pub fn get(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable body by key
    pub fn get_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Find a body by name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<(BodyKey, &Body)> {
        self.iter().find(|(_, body)| body.name.eq_ignore_ascii_case(name))
    }

    /// Iterate bodies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.order.iter().map(move |&key| (key, &self.bodies[key]))
    }

    /// Number of bodies
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bodies the number keys can select, in insertion order
    pub fn trackable(&self) -> Vec<BodyKey> {
        self.iter()
            .filter(|(_, body)| body.kind.is_trackable())
            .map(|(key, _)| key)
            .collect()
    }

    /// The first star in the system (the light source)
    pub fn star(&self) -> Option<(BodyKey, &Body)> {
        self.iter().find(|(_, body)| body.kind == BodyKind::Star)
    }

    /// Number of bodies of the given kind
    pub fn count(&self, kind: BodyKind) -> usize {
        self.iter().filter(|(_, body)| body.kind == kind).count()
    }

    /// Current scene rotation as (roll about Z, pitch about X) in degrees
    pub fn scene_rotation(&self) -> (f32, f32) {
        (self.scene_roll_deg, self.scene_pitch_deg)
    }

    /// Add to the scene rotation; angles wrap to `[0, 360)`
    pub fn rotate_scene(&mut self, d_roll_deg: f32, d_pitch_deg: f32) {
        self.scene_roll_deg = wrap_degrees(self.scene_roll_deg + d_roll_deg);
        self.scene_pitch_deg = wrap_degrees(self.scene_pitch_deg + d_pitch_deg);
    }

    pub fn reset_scene_rotation(&mut self) {
        self.scene_roll_deg = 0.0;
        self.scene_pitch_deg = 0.0;
    }

    /// `T(origin) · Rx(pitch) · Rz(roll)`
    pub fn scene_transform(&self) -> Mat4 {
        mat4::mul_all(&[
            mat4::translation(self.origin),
            mat4::rotation_x(deg_to_rad(self.scene_pitch_deg)),
            mat4::rotation_z(deg_to_rad(self.scene_roll_deg)),
        ])
    }

    /// Recompute every body's state for simulated time `t`
    pub fn update(&mut self, t: f64) {
        self.time = t;
        let scene = self.scene_transform();

        for &key in &self.order {
            let parent_position = self.bodies[key]
                .parent
                .and_then(|parent| self.bodies.get(parent))
                .map(|parent| parent.state.system_position)
                .unwrap_or(Vec3::ZERO);

            let body = &mut self.bodies[key];
            let (offset, orbit_angle) = match &body.orbit {
                Some(orbit) => (orbit.local_position(t), orbit.angle_deg(t)),
                None => (Vec3::ZERO, 0.0),
            };
            let system_position = parent_position + offset;
            let spin_angle = body.spin.angle_deg(t);

            body.state.system_position = system_position;
            body.state.world_position = mat4::transform_point(scene, system_position);
            body.state.orbit_angle_deg = orbit_angle;
            body.state.spin_angle_deg = spin_angle;
            body.state.model = mat4::mul_all(&[
                scene,
                mat4::translation(system_position),
                mat4::rotation_z(deg_to_rad(body.spin.axial_tilt_deg)),
                mat4::rotation_y(deg_to_rad(spin_angle)),
                mat4::uniform_scale(body.radius),
            ]);
        }
    }

    /// System-space position of a body's parent (origin when it has none)
    fn parent_system_position(&self, body: &Body) -> Vec3 {
        body.parent
            .and_then(|parent| self.bodies.get(parent))
            .map(|parent| parent.state.system_position)
            .unwrap_or(Vec3::ZERO)
    }

    /// Orbit and ring outlines for the current state
    pub fn guides(&self, orbit_color: [f32; 4]) -> Vec<GuideLoop> {
        let scene = self.scene_transform();
        let mut guides = Vec::new();

        for (_, body) in self.iter() {
            if let Some(orbit) = &body.orbit {
                if !orbit.is_degenerate() {
                    let model = mat4::mul_all(&[
                        scene,
                        mat4::translation(self.parent_system_position(body)),
                        mat4::rotation_z(deg_to_rad(orbit.inclination_deg)),
                        mat4::scale(Vec3::new(orbit.semi_major, 1.0, orbit.semi_minor)),
                    ]);
                    guides.push(GuideLoop {
                        model,
                        color: orbit_color,
                        kind: GuideKind::Orbit,
                    });
                }
            }

            if let Some(rings) = &body.rings {
                let base = mat4::mul_all(&[
                    scene,
                    mat4::translation(body.state.system_position),
                    mat4::rotation_z(deg_to_rad(rings.tilt_deg)),
                ]);
                for radius in rings.radii() {
                    guides.push(GuideLoop {
                        model: mat4::mul(base, mat4::uniform_scale(radius)),
                        color: rings.color,
                        kind: GuideKind::Ring,
                    });
                }
            }
        }

        guides
    }

    /// Eye position for a camera following `key`
    ///
    /// The eye sits on the body's orbital plane at the same orbital angle,
    /// `offset` units further out, raised by the body's tracking height.
    /// A body's own tracking offset replaces `offset`. Bodies without an
    /// orbit are viewed from `offset` past their surface along +Z.
    pub fn tracking_eye(&self, key: BodyKey, offset: f32) -> Option<Vec3> {
        let body = self.bodies.get(key)?;
        let offset = body.tracking_offset.unwrap_or(offset);
        let lift = Vec3::Y * body.tracking_height_or_default();
        let eye = match &body.orbit {
            Some(orbit) => {
                self.parent_system_position(body)
                    + orbit.position_at_angle(body.state.orbit_angle_deg, offset)
                    + lift
            }
            None => body.state.system_position + Vec3::Z * (body.radius + offset) + lift,
        };
        Some(mat4::transform_point(self.scene_transform(), eye))
    }
}
