//! System construction utilities
//!
//! This module provides a declarative API for building systems, the
//! built-in presets, and the startup loader that falls back to them.

mod loader;
mod system_builder;

pub use loader::load_system;
pub use system_builder::SystemBuilder;
