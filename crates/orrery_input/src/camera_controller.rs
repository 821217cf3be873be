//! Camera controller
//!
//! Controls in orbit mode (the overview):
//! - Left drag: orbit the camera around the system
//! - W/S, A/D: step the orbit elevation/azimuth
//! - Right drag: rotate the whole scene
//! - Scroll: zoom, faster when far away
//!
//! Controls in free mode:
//! - W/S, A/D: forward/back, strafe
//! - Shift/Ctrl: up/down
//! - Mouse: look (while the cursor is captured or the left button is held)
//! - Scroll: move forward/back

use orrery_math::Vec3;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// How input is applied to the camera
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// Camera circles a target; scene rotation allowed
    Orbit,
    /// Fly-through camera
    Free,
    /// Camera is placed by someone else (body tracking); input ignored
    Locked,
}

/// Zoom step per scroll notch for a given altitude
pub fn zoom_speed_for_altitude(altitude: f32) -> f32 {
    if altitude >= 200.0 {
        400.0
    } else if altitude >= 125.0 {
        300.0
    } else if altitude >= 70.0 {
        200.0
    } else {
        100.0
    }
}

/// Camera controller for handling input
pub struct CameraController {
    mode: ControlMode,

    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    // Mouse state
    mouse_pressed: bool,
    scene_drag: bool,
    pending_dx: f32,
    pending_dy: f32,
    pending_scroll: f32,

    // Discrete orbit steps from the keyboard (azimuth, elevation)
    pending_orbit_steps: (f32, f32),
    // Scene rotation waiting to be consumed (roll, pitch)
    pending_scene: (f32, f32),

    // Input smoothing state
    smooth_dx: f32,
    smooth_dy: f32,

    // Configuration
    pub move_speed: f32,
    /// Degrees of look per pixel in free mode
    pub mouse_sensitivity: f32,
    /// Degrees of orbit per pixel of left drag
    pub orbit_sensitivity: f32,
    /// Degrees of orbit per key press
    pub orbit_key_step: f32,
    /// Degrees of scene rotation per pixel of right drag
    pub scene_sensitivity: f32,
    /// Multiplier on the altitude-banded zoom step
    pub zoom_sensitivity: f32,
    /// World units per zoom band unit
    pub zoom_unit: f32,
    pub smoothing_half_life: f32, // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            mode: ControlMode::Orbit,

            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,

            mouse_pressed: false,
            scene_drag: false,
            pending_dx: 0.0,
            pending_dy: 0.0,
            pending_scroll: 0.0,

            pending_orbit_steps: (0.0, 0.0),
            pending_scene: (0.0, 0.0),

            smooth_dx: 0.0,
            smooth_dy: 0.0,

            move_speed: 150.0,
            mouse_sensitivity: 0.1,
            orbit_sensitivity: 0.2,
            orbit_key_step: 5.0,
            scene_sensitivity: 0.1,
            zoom_sensitivity: 0.25,
            zoom_unit: 1.0,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Current control mode
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch control mode, dropping any held keys and pending input
    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            log::debug!("Camera control mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.clear();
    }

    /// Forget all key, button and pending mouse state
    pub fn clear(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.mouse_pressed = false;
        self.scene_drag = false;
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
        self.pending_scroll = 0.0;
        self.pending_orbit_steps = (0.0, 0.0);
        self.pending_scene = (0.0, 0.0);
        self.smooth_dx = 0.0;
        self.smooth_dy = 0.0;
    }

    /// Process keyboard input, returning true if the key was consumed
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match self.mode {
            ControlMode::Locked => false,
            ControlMode::Orbit => {
                let step = self.orbit_key_step;
                let (az, el) = match key {
                    KeyCode::KeyW => (0.0, step),
                    KeyCode::KeyS => (0.0, -step),
                    KeyCode::KeyA => (-step, 0.0),
                    KeyCode::KeyD => (step, 0.0),
                    _ => return false,
                };
                if pressed {
                    self.pending_orbit_steps.0 += az;
                    self.pending_orbit_steps.1 += el;
                }
                true
            }
            ControlMode::Free => match key {
                KeyCode::KeyW => { self.forward = pressed; true }
                KeyCode::KeyS => { self.backward = pressed; true }
                KeyCode::KeyA => { self.left = pressed; true }
                KeyCode::KeyD => { self.right = pressed; true }
                KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.up = pressed; true }
                KeyCode::ControlLeft | KeyCode::ControlRight => { self.down = pressed; true }
                _ => false,
            },
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => {
                self.mouse_pressed = pressed;
            }
            MouseButton::Right => {
                self.scene_drag = pressed;
            }
            _ => {}
        }
    }

    /// Process mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_dx += delta_x as f32;
        self.pending_dy += delta_y as f32;
    }

    /// Process scroll wheel input in notches (positive zooms in)
    pub fn process_scroll(&mut self, notches: f32) {
        if self.mode != ControlMode::Locked {
            self.pending_scroll += notches;
        }
    }

    /// Zoom step for one scroll notch at the camera's current altitude
    fn zoom_step<C: CameraControl>(&self, camera: &C) -> f32 {
        let altitude = match self.mode {
            ControlMode::Orbit => camera.distance(),
            _ => camera.position().y.abs(),
        };
        let unit = self.zoom_unit.max(f32::EPSILON);
        zoom_speed_for_altitude(altitude / unit) * unit * self.zoom_sensitivity
    }

    /// Update the camera based on accumulated input
    ///
    /// When `cursor_captured` is true, free look is enabled without holding a
    /// button. Returns the camera position.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) -> Vec3 {
        if self.mode == ControlMode::Locked {
            self.pending_dx = 0.0;
            self.pending_dy = 0.0;
            self.pending_scroll = 0.0;
            return camera.position();
        }

        // Apply exponential smoothing to mouse input
        let (dx, dy) = if self.smoothing_enabled && dt > 0.0 {
            // factor = 2^(-dt / half_life), so smaller half_life = faster response
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_dx = self.smooth_dx * smooth_factor + self.pending_dx * (1.0 - smooth_factor);
            self.smooth_dy = self.smooth_dy * smooth_factor + self.pending_dy * (1.0 - smooth_factor);
            (self.smooth_dx, self.smooth_dy)
        } else {
            (self.pending_dx, self.pending_dy)
        };

        if self.pending_scroll != 0.0 {
            let amount = self.pending_scroll * self.zoom_step(camera);
            camera.zoom(amount);
        }

        match self.mode {
            ControlMode::Orbit => {
                let (az, el) = self.pending_orbit_steps;
                if az != 0.0 || el != 0.0 {
                    camera.orbit(az, el);
                }
                if self.mouse_pressed {
                    camera.orbit(dx * self.orbit_sensitivity, dy * self.orbit_sensitivity);
                } else if self.scene_drag {
                    self.pending_scene.0 += dx * self.scene_sensitivity;
                    self.pending_scene.1 += dy * self.scene_sensitivity;
                }
            }
            ControlMode::Free => {
                let fwd = (self.forward as i32 - self.backward as i32) as f32;
                let rgt = (self.right as i32 - self.left as i32) as f32;
                let up_down = (self.up as i32 - self.down as i32) as f32;
                let step = self.move_speed * dt;
                camera.move_local(fwd * step, rgt * step, up_down * step);

                if cursor_captured || self.mouse_pressed {
                    // Mouse right turns right, mouse down looks down
                    camera.look(dx * self.mouse_sensitivity, -dy * self.mouse_sensitivity);
                }
            }
            ControlMode::Locked => {}
        }

        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
        self.pending_scroll = 0.0;
        self.pending_orbit_steps = (0.0, 0.0);

        camera.position()
    }

    /// Take the scene rotation accumulated by right-dragging, as
    /// (roll about Z, pitch about X) in degrees
    pub fn take_scene_rotation(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.pending_scene)
    }

    /// Check if any movement keys are pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        // Reset smoothing state when toggling
        self.smooth_dx = 0.0;
        self.smooth_dy = 0.0;
        self.smoothing_enabled
    }

    /// Check if smoothing is enabled
    pub fn is_smoothing_enabled(&self) -> bool {
        self.smoothing_enabled
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set free-look sensitivity (degrees per pixel)
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set orbit drag sensitivity (degrees per pixel)
    pub fn with_orbit_sensitivity(mut self, sensitivity: f32) -> Self {
        self.orbit_sensitivity = sensitivity;
        self
    }

    /// Builder: set orbit step per key press (degrees)
    pub fn with_orbit_key_step(mut self, step: f32) -> Self {
        self.orbit_key_step = step;
        self
    }

    /// Builder: set scene rotation sensitivity (degrees per pixel)
    pub fn with_scene_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scene_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom multiplier
    pub fn with_zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Builder: set world units per zoom band unit
    pub fn with_zoom_unit(mut self, unit: f32) -> Self {
        self.zoom_unit = unit;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move along the camera's own axes
    fn move_local(&mut self, forward: f32, right: f32, up: f32);
    /// Turn the view (degrees)
    fn look(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Circle the orbit target (degrees)
    fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32);
    /// Move closer by `amount` (negative moves away)
    fn zoom(&mut self, amount: f32);
    /// Distance to the orbit target
    fn distance(&self) -> f32;
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call so tests can check what the controller did
    #[derive(Default)]
    struct MockCamera {
        moved: Vec3,
        look: (f32, f32),
        orbit: (f32, f32),
        zoomed: f32,
        distance: f32,
        position: Vec3,
    }

    impl CameraControl for MockCamera {
        fn move_local(&mut self, forward: f32, right: f32, up: f32) {
            self.moved += Vec3::new(right, up, forward);
        }
        fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.look.0 += delta_yaw;
            self.look.1 += delta_pitch;
        }
        fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
            self.orbit.0 += delta_azimuth;
            self.orbit.1 += delta_elevation;
        }
        fn zoom(&mut self, amount: f32) {
            self.zoomed += amount;
        }
        fn distance(&self) -> f32 {
            self.distance
        }
        fn position(&self) -> Vec3 {
            self.position
        }
    }

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_zoom_bands() {
        assert_eq!(zoom_speed_for_altitude(500.0), 400.0);
        assert_eq!(zoom_speed_for_altitude(200.0), 400.0);
        assert_eq!(zoom_speed_for_altitude(199.0), 300.0);
        assert_eq!(zoom_speed_for_altitude(125.0), 300.0);
        assert_eq!(zoom_speed_for_altitude(70.0), 200.0);
        assert_eq!(zoom_speed_for_altitude(69.9), 100.0);
        assert_eq!(zoom_speed_for_altitude(-10.0), 100.0);
    }

    #[test]
    fn test_orbit_key_steps() {
        let mut controller = CameraController::new();
        let mut cam = MockCamera::default();
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Released);
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.orbit, (5.0, 5.0));

        // Steps are consumed once
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.orbit, (5.0, 5.0));
    }

    #[test]
    fn test_left_drag_orbits() {
        let mut controller = CameraController::new();
        let mut cam = MockCamera::default();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(10.0, -5.0);
        controller.update(&mut cam, 0.016, false);
        assert!((cam.orbit.0 - 2.0).abs() < EPSILON);
        assert!((cam.orbit.1 + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_motion_without_button_does_nothing_in_orbit() {
        let mut controller = CameraController::new();
        let mut cam = MockCamera::default();
        controller.process_mouse_motion(10.0, 10.0);
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.orbit, (0.0, 0.0));
        assert_eq!(controller.take_scene_rotation(), (0.0, 0.0));
    }

    #[test]
    fn test_right_drag_accumulates_scene_rotation() {
        let mut controller = CameraController::new();
        let mut cam = MockCamera::default();
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_mouse_motion(20.0, 10.0);
        controller.update(&mut cam, 0.016, false);
        let (roll, pitch) = controller.take_scene_rotation();
        assert!((roll - 2.0).abs() < EPSILON);
        assert!((pitch - 1.0).abs() < EPSILON);
        assert_eq!(controller.take_scene_rotation(), (0.0, 0.0));
        assert_eq!(cam.orbit, (0.0, 0.0));
    }

    #[test]
    fn test_scroll_uses_altitude_band() {
        let mut controller = CameraController::new().with_zoom_sensitivity(1.0);
        let mut cam = MockCamera {
            distance: 500.0,
            ..Default::default()
        };
        controller.process_scroll(1.0);
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.zoomed, 400.0);

        cam.distance = 50.0;
        controller.process_scroll(-2.0);
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.zoomed, 200.0);
    }

    #[test]
    fn test_zoom_unit_scales_bands() {
        let mut controller = CameraController::new()
            .with_zoom_sensitivity(1.0)
            .with_zoom_unit(0.05);
        // 30 units at 0.05 per band unit is altitude 600
        let mut cam = MockCamera {
            distance: 30.0,
            ..Default::default()
        };
        controller.process_scroll(1.0);
        controller.update(&mut cam, 0.016, false);
        assert!((cam.zoomed - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_free_mode_movement() {
        let mut controller = CameraController::new().with_move_speed(10.0);
        controller.set_mode(ControlMode::Free);
        let mut cam = MockCamera::default();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(controller.is_moving());
        controller.update(&mut cam, 0.5, false);
        assert_eq!(cam.moved, Vec3::new(0.0, 5.0, 5.0));
        assert_eq!(cam.orbit, (0.0, 0.0));
    }

    #[test]
    fn test_free_look_requires_capture_or_button() {
        let mut controller = CameraController::new().with_mouse_sensitivity(1.0);
        controller.set_mode(ControlMode::Free);
        let mut cam = MockCamera::default();

        controller.process_mouse_motion(3.0, 4.0);
        controller.update(&mut cam, 0.016, false);
        assert_eq!(cam.look, (0.0, 0.0));

        controller.process_mouse_motion(3.0, 4.0);
        controller.update(&mut cam, 0.016, true);
        assert_eq!(cam.look, (3.0, -4.0));
    }

    #[test]
    fn test_locked_mode_ignores_input() {
        let mut controller = CameraController::new();
        controller.set_mode(ControlMode::Locked);
        let mut cam = MockCamera::default();
        assert!(!controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(100.0, 100.0);
        controller.process_scroll(3.0);
        controller.update(&mut cam, 0.016, true);
        assert_eq!(cam.orbit, (0.0, 0.0));
        assert_eq!(cam.look, (0.0, 0.0));
        assert_eq!(cam.zoomed, 0.0);
    }

    #[test]
    fn test_set_mode_clears_held_keys() {
        let mut controller = CameraController::new();
        controller.set_mode(ControlMode::Free);
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(controller.is_moving());
        controller.set_mode(ControlMode::Orbit);
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_smoothing_damps_motion() {
        let mut controller = CameraController::new()
            .with_mouse_sensitivity(1.0)
            .with_smoothing(true);
        controller.set_mode(ControlMode::Free);
        let mut cam = MockCamera::default();
        controller.process_mouse_motion(10.0, 0.0);
        controller.update(&mut cam, 0.016, true);
        assert!(cam.look.0 > 0.0 && cam.look.0 < 10.0);
    }

    #[test]
    fn test_toggle_smoothing() {
        let mut controller = CameraController::new();
        assert!(!controller.is_smoothing_enabled());
        assert!(controller.toggle_smoothing());
        assert!(!controller.toggle_smoothing());
    }

    #[test]
    fn test_unmapped_key_not_consumed() {
        let mut controller = CameraController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyZ, ElementState::Pressed));
        assert!(controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed));
    }
}
