//! Orrery - a real-time 3D solar system viewer
//!
//! The binary wires these modules to a winit event loop; they are exposed as
//! a library so that the configuration and simulation can be tested without
//! a window.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
