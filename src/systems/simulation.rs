//! Simulation system
//!
//! Manages the per-frame simulation including:
//! - Delta time calculation and the simulation clock
//! - Input → camera and scene rotation
//! - Body update
//! - Camera modes (overview, free, tracking a body)
//! - Overlay text

use std::time::Instant;

use orrery_core::{body_lines, overview_lines, BodyKey, SimulationClock, SolarSystem};
use orrery_input::{CameraController, ControlMode};
use orrery_render::camera::{Camera3D, OrbitPose};

/// Which view the camera is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Orbiting the whole system; the scene may be rotated
    Overview,
    /// Flying freely
    Free,
    /// Following the n-th trackable body (1-based)
    Tracking(usize),
}

impl CameraMode {
    /// Overlay label for the mode
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Overview => "STATIC CAM",
            CameraMode::Free => "FREE CAM",
            CameraMode::Tracking(_) => "PLANET CAM",
        }
    }

    fn control_mode(self) -> ControlMode {
        match self {
            CameraMode::Overview => ControlMode::Orbit,
            CameraMode::Free => ControlMode::Free,
            CameraMode::Tracking(_) => ControlMode::Locked,
        }
    }
}

/// Result of a simulation update
pub struct SimulationResult {
    /// New overlay lines, present only when they changed this frame
    pub overlay: Option<Vec<String>>,
}

/// Build the overview camera for a system
pub fn overview_camera(system: &SolarSystem, fov_deg: f32) -> Camera3D {
    let hints = system.view_hints();
    Camera3D::with_orbit(OrbitPose {
        target: system.origin(),
        azimuth_deg: hints.azimuth_deg,
        elevation_deg: hints.elevation_deg,
        distance: hints.distance,
    })
    .with_distance_limits(hints.min_distance, hints.max_distance)
    .with_projection(fov_deg, hints.near, hints.far)
}

/// Manages the simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    clock: SimulationClock,
    mode: CameraMode,
    tracked: Option<BodyKey>,
    overlay: Vec<String>,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(clock: SimulationClock) -> Self {
        Self {
            last_frame: Instant::now(),
            clock,
            mode: CameraMode::Overview,
            tracked: None,
            overlay: Vec::new(),
        }
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Key of the followed body while tracking
    pub fn tracked(&self) -> Option<BodyKey> {
        self.tracked
    }

    /// Switch camera mode
    ///
    /// Returns false (and keeps the current mode) when a tracking request
    /// names a body that does not exist. Leaving the overview undoes any
    /// scene rotation.
    pub fn set_mode(
        &mut self,
        mode: CameraMode,
        system: &mut SolarSystem,
        camera: &mut Camera3D,
        controller: &mut CameraController,
    ) -> bool {
        let tracked = match mode {
            CameraMode::Tracking(n) => {
                let trackable = system.trackable();
                match n.checked_sub(1).and_then(|i| trackable.get(i)) {
                    Some(&key) => Some(key),
                    None => {
                        log::warn!("No trackable body number {} ({} available)", n, trackable.len());
                        return false;
                    }
                }
            }
            _ => None,
        };

        if self.mode == CameraMode::Overview && mode != CameraMode::Overview {
            system.reset_scene_rotation();
        }

        controller.set_mode(mode.control_mode());
        match mode {
            CameraMode::Overview => camera.reset(),
            CameraMode::Free => camera.set_orbit_attached(false),
            CameraMode::Tracking(_) => camera.set_orbit_attached(false),
        }

        self.mode = mode;
        self.tracked = tracked;
        if let Some(key) = tracked {
            self.place_tracking_camera(key, system, camera);
            if let Some(body) = system.get(key) {
                log::info!("Tracking {}", body.name);
            }
        } else {
            log::info!("Camera mode: {}", mode.label());
        }
        true
    }

    /// Return to the overview pose with the scene unrotated
    pub fn reset_camera(
        &mut self,
        system: &mut SolarSystem,
        camera: &mut Camera3D,
        controller: &mut CameraController,
    ) {
        system.reset_scene_rotation();
        self.set_mode(CameraMode::Overview, system, camera, controller);
    }

    /// Run one simulation frame using the wall clock
    pub fn update(
        &mut self,
        system: &mut SolarSystem,
        camera: &mut Camera3D,
        controller: &mut CameraController,
        cursor_captured: bool,
    ) -> SimulationResult {
        let now = Instant::now();
        let real_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(system, camera, controller, cursor_captured, real_dt)
    }

    /// Run one simulation frame of `real_dt` seconds
    pub fn step(
        &mut self,
        system: &mut SolarSystem,
        camera: &mut Camera3D,
        controller: &mut CameraController,
        cursor_captured: bool,
        real_dt: f32,
    ) -> SimulationResult {
        // Input moves the camera in real time, independent of the clock
        let dt = real_dt.clamp(0.0, orrery_core::MAX_FRAME_STEP);
        controller.update(camera, dt, cursor_captured);

        let (roll, pitch) = controller.take_scene_rotation();
        if self.mode == CameraMode::Overview && (roll != 0.0 || pitch != 0.0) {
            system.rotate_scene(roll, pitch);
        }

        self.clock.advance(real_dt);
        system.update(self.clock.elapsed());

        if let Some(key) = self.tracked {
            self.place_tracking_camera(key, system, camera);
        }

        let overlay = self.overlay_lines(system);
        let changed = overlay != self.overlay;
        if changed {
            for line in &overlay {
                log::info!("{}", line);
            }
            self.overlay = overlay.clone();
        }

        SimulationResult {
            overlay: changed.then_some(overlay),
        }
    }

    /// Current overlay text
    pub fn overlay_lines(&self, system: &SolarSystem) -> Vec<String> {
        let mut lines = match self.tracked.and_then(|key| system.get(key)) {
            Some(body) => body_lines(body),
            None => overview_lines(system, system.catalog()),
        };
        lines.push(self.mode.label().to_string());
        if self.clock.is_paused() {
            lines.push("PAUSED".to_string());
        } else if self.clock.time_scale() != 1.0 {
            lines.push(format!("TIME x{}", self.clock.time_scale()));
        }
        lines
    }

    fn place_tracking_camera(&self, key: BodyKey, system: &SolarSystem, camera: &mut Camera3D) {
        let offset = system.view_hints().tracking_offset;
        if let (Some(eye), Some(body)) = (system.tracking_eye(key, offset), system.get(key)) {
            camera.look_from(eye, body.position());
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(SimulationClock::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SystemBuilder;

    struct Fixture {
        sim: SimulationSystem,
        system: SolarSystem,
        camera: Camera3D,
        controller: CameraController,
    }

    impl Fixture {
        fn new() -> Self {
            let system = SystemBuilder::solar_system().build().unwrap();
            let camera = overview_camera(&system, 45.0);
            Self {
                sim: SimulationSystem::default(),
                system,
                camera,
                controller: CameraController::new(),
            }
        }

        fn set_mode(&mut self, mode: CameraMode) -> bool {
            self.sim.set_mode(mode, &mut self.system, &mut self.camera, &mut self.controller)
        }

        fn step(&mut self, dt: f32) -> SimulationResult {
            self.sim.step(&mut self.system, &mut self.camera, &mut self.controller, false, dt)
        }
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert_eq!(sim.mode(), CameraMode::Overview);
        assert!(sim.tracked().is_none());
        assert_eq!(sim.clock().elapsed(), 0.0);
    }

    #[test]
    fn test_overview_camera_uses_view_hints() {
        let system = SystemBuilder::solar_system().build().unwrap();
        let camera = overview_camera(&system, 45.0);
        assert!((camera.position.length() - 515.0).abs() < 1e-2);
        assert_eq!(camera.far, system.view_hints().far);
    }

    #[test]
    fn test_step_advances_clock() {
        let mut f = Fixture::new();
        f.step(0.1);
        f.step(0.1);
        assert!((f.sim.clock().elapsed() - 0.2).abs() < 1e-6);
        assert!((f.system.time() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_paused_clock_freezes_bodies() {
        let mut f = Fixture::new();
        f.step(0.1);
        let (_, earth) = f.system.find_by_name("Earth").unwrap();
        let before = earth.position();
        f.sim.clock_mut().toggle_pause();
        f.step(0.5);
        let (_, earth) = f.system.find_by_name("Earth").unwrap();
        assert_eq!(earth.position(), before);
    }

    #[test]
    fn test_track_body_by_number() {
        let mut f = Fixture::new();
        assert!(f.set_mode(CameraMode::Tracking(3)));
        assert_eq!(f.controller.mode(), ControlMode::Locked);
        let (earth_key, _) = f.system.find_by_name("Earth").unwrap();
        assert_eq!(f.sim.tracked(), Some(earth_key));

        f.step(0.5);
        let (_, earth) = f.system.find_by_name("Earth").unwrap();
        let distance = f.camera.position.distance(earth.position());
        // Earth's own offset of 140 replaces the system-wide 200
        let expected = (140.0f32 * 140.0 + 50.0 * 50.0).sqrt();
        assert!((distance - expected).abs() < 0.1, "distance {}", distance);
    }

    #[test]
    fn test_tracking_offset_differs_per_planet() {
        let mut f = Fixture::new();
        assert!(f.set_mode(CameraMode::Tracking(4)));
        f.step(0.5);
        let (_, mars) = f.system.find_by_name("Mars").unwrap();
        let distance = f.camera.position.distance(mars.position());
        let expected = (70.0f32 * 70.0 + 20.0 * 20.0).sqrt();
        assert!((distance - expected).abs() < 0.1, "distance {}", distance);
    }

    #[test]
    fn test_unknown_track_number_keeps_mode() {
        let mut f = Fixture::new();
        assert!(!f.set_mode(CameraMode::Tracking(9)));
        assert!(!f.set_mode(CameraMode::Tracking(0)));
        assert_eq!(f.sim.mode(), CameraMode::Overview);
    }

    #[test]
    fn test_leaving_overview_resets_scene_rotation() {
        let mut f = Fixture::new();
        f.system.rotate_scene(20.0, -10.0);
        assert!(f.set_mode(CameraMode::Free));
        assert_eq!(f.system.scene_rotation(), (0.0, 0.0));
        assert_eq!(f.controller.mode(), ControlMode::Free);
        assert!(!f.camera.is_orbit_attached());
    }

    #[test]
    fn test_overview_returns_home() {
        let mut f = Fixture::new();
        let home = f.camera.position;
        f.set_mode(CameraMode::Tracking(5));
        f.step(0.1);
        f.set_mode(CameraMode::Overview);
        assert!(f.camera.position.distance(home) < 1e-3);
        assert!(f.sim.tracked().is_none());
    }

    #[test]
    fn test_overlay_reported_on_change_only() {
        let mut f = Fixture::new();
        let first = f.step(0.016).overlay.unwrap();
        assert_eq!(first[0], "SOLAR SYSTEM");
        assert_eq!(first.last().map(String::as_str), Some("STATIC CAM"));
        assert!(f.step(0.016).overlay.is_none());

        f.set_mode(CameraMode::Tracking(3));
        let tracking = f.step(0.016).overlay.unwrap();
        assert_eq!(tracking[0], "Planet: EARTH");
        assert!(tracking.contains(&"PLANET CAM".to_string()));
    }

    #[test]
    fn test_overlay_shows_clock_state() {
        let mut f = Fixture::new();
        f.sim.clock_mut().speed_up();
        assert!(f.sim.overlay_lines(&f.system).contains(&"TIME x2".to_string()));
        f.sim.clock_mut().toggle_pause();
        assert!(f.sim.overlay_lines(&f.system).contains(&"PAUSED".to_string()));
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(CameraMode::Overview.label(), "STATIC CAM");
        assert_eq!(CameraMode::Free.label(), "FREE CAM");
        assert_eq!(CameraMode::Tracking(1).label(), "PLANET CAM");
    }
}
