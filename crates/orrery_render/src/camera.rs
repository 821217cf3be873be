//! 3D camera with yaw/pitch look and an orbit rig
//!
//! The camera always has a position and a yaw/pitch orientation. While the
//! orbit rig is attached, orbit and zoom moves re-place the camera on a
//! sphere around the orbit target and turn it to face the target. Detached,
//! the camera flies freely.

use orrery_input::CameraControl;
use orrery_math::{deg_to_rad, mat4, Mat4, Vec3};

/// Pitch and elevation limit in degrees
const MAX_PITCH: f32 = 89.0;

/// Starting pose of the orbit rig
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPose {
    pub target: Vec3,
    pub azimuth_deg: f32,
    pub elevation_deg: f32,
    pub distance: f32,
}

/// Camera for viewing the system
pub struct Camera3D {
    /// World position
    pub position: Vec3,
    /// Degrees; 0 looks down +X, 90 down +Z
    yaw: f32,
    /// Degrees, clamped to +/-89
    pitch: f32,

    // Orbit rig
    orbit_attached: bool,
    target: Vec3,
    azimuth: f32,
    elevation: f32,
    distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    home: OrbitPose,

    // Projection
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera3D {
    /// Create a camera orbiting the origin from 30 units along +Z
    pub fn new() -> Self {
        Self::with_orbit(OrbitPose {
            target: Vec3::ZERO,
            azimuth_deg: 0.0,
            elevation_deg: 0.0,
            distance: 30.0,
        })
    }

    /// Create a camera on the given orbit; `reset` returns to this pose
    pub fn with_orbit(home: OrbitPose) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            orbit_attached: true,
            target: home.target,
            azimuth: home.azimuth_deg,
            elevation: home.elevation_deg,
            distance: home.distance,
            min_distance: 1.0,
            max_distance: 10_000.0,
            home,
            fov_deg: 45.0,
            near: 1.0,
            far: 10_000.0,
        };
        camera.apply_orbit();
        camera
    }

    /// Builder: limit the orbit distance
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.apply_orbit();
        self
    }

    /// Builder: set the projection parameters
    pub fn with_projection(mut self, fov_deg: f32, near: f32, far: f32) -> Self {
        self.fov_deg = fov_deg;
        self.near = near;
        self.far = far;
        self
    }

    /// Return to the home orbit pose and attach the orbit rig
    pub fn reset(&mut self) {
        self.target = self.home.target;
        self.azimuth = self.home.azimuth_deg;
        self.elevation = self.home.elevation_deg;
        self.distance = self.home.distance.clamp(self.min_distance, self.max_distance);
        self.orbit_attached = true;
        self.apply_orbit();
    }

    /// Attach or detach the orbit rig
    ///
    /// Attaching re-derives the orbit parameters from where the camera is now,
    /// so the view does not jump.
    pub fn set_orbit_attached(&mut self, attached: bool) {
        if attached && !self.orbit_attached {
            let offset = self.position - self.target;
            self.distance = offset.length().clamp(self.min_distance, self.max_distance);
            if self.distance > 0.0 {
                let dir = offset.normalized();
                self.elevation = dir.y.clamp(-1.0, 1.0).asin().to_degrees().clamp(-MAX_PITCH, MAX_PITCH);
                self.azimuth = dir.x.atan2(dir.z).to_degrees();
            }
            self.orbit_attached = true;
            self.apply_orbit();
        } else {
            self.orbit_attached = attached;
        }
    }

    pub fn is_orbit_attached(&self) -> bool {
        self.orbit_attached
    }

    /// Place the camera at `eye` facing `target`
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye;
        self.face(target);
    }

    /// Turn to face a point
    pub fn face(&mut self, target: Vec3) {
        let dir = (target - self.position).normalized();
        if dir == Vec3::ZERO {
            return;
        }
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees().clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Re-place the camera on its orbit and face the target
    fn apply_orbit(&mut self) {
        let (sa, ca) = deg_to_rad(self.azimuth).sin_cos();
        let (se, ce) = deg_to_rad(self.elevation).sin_cos();
        let offset = Vec3::new(ce * sa, se, ce * ca) * self.distance;
        self.position = self.target + offset;
        self.face(self.target);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        let (sy, cy) = deg_to_rad(self.yaw).sin_cos();
        let (sp, cp) = deg_to_rad(self.pitch).sin_cos();
        Vec3::new(cy * cp, sp, sy * cp).normalized()
    }

    /// Unit vector to the right of the view
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalized()
    }

    /// Unit vector up from the view
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front())
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.front(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(deg_to_rad(self.fov_deg), aspect, self.near, self.far)
    }

    /// Projection times view
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}

impl CameraControl for Camera3D {
    fn move_local(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.front() * forward + self.right() * right + Vec3::Y * up;
    }

    fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth = orrery_math::wrap_degrees(self.azimuth + delta_azimuth);
        self.elevation = (self.elevation + delta_elevation).clamp(-MAX_PITCH, MAX_PITCH);
        if self.orbit_attached {
            self.apply_orbit();
        }
    }

    fn zoom(&mut self, amount: f32) {
        if self.orbit_attached {
            self.distance = (self.distance - amount).clamp(self.min_distance, self.max_distance);
            self.apply_orbit();
        } else {
            self.position += self.front() * amount;
        }
    }

    fn distance(&self) -> f32 {
        self.distance
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
