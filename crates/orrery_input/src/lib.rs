//! Orrery input handling
//!
//! Turns raw keyboard, mouse and scroll events into camera moves and scene
//! rotation. The controller knows nothing about the concrete camera; it
//! drives anything implementing [`CameraControl`].

mod camera_controller;

pub use camera_controller::{zoom_speed_for_altitude, CameraControl, CameraController, ControlMode};
