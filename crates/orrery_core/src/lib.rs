//! Core types for the orrery
//!
//! This crate holds everything that can be computed without a GPU:
//!
//! - [`Orbit`], [`Spin`], [`RingSystem`] - kinematic motion of a body
//! - [`Body`] - a star, planet or moon and its per-frame [`BodyState`]
//! - [`SolarSystem`] - container for all bodies, keyed by [`BodyKey`]
//! - [`SimulationClock`] - real time to simulated time
//! - [`SystemTemplate`] - loadable/saveable description of a system
//! - [`SystemValidator`] - authoring checks for templates
//! - [`overview_lines`], [`body_lines`] - overlay text

mod orbit;
mod body;
mod system;
mod clock;
mod layers;
mod overlay;
mod template;
mod validator;
mod view;

pub use orbit::{Orbit, Spin, RingSystem, MAX_RING_COUNT};
pub use body::{Body, BodyKind, BodyState, BodyFacts, DEFAULT_TRACKING_HEIGHT};
pub use system::{SolarSystem, BodyKey, SystemError, GuideLoop, GuideKind};
pub use clock::{SimulationClock, MAX_FRAME_STEP, MIN_TIME_SCALE, MAX_TIME_SCALE};
pub use layers::RenderLayers;
pub use overlay::{Catalog, overview_lines, body_lines};
pub use template::{SystemTemplate, BodyTemplate, TemplateLoadError, TemplateSaveError, TemplateError};
pub use validator::{SystemValidator, ValidationError};
pub use view::ViewHints;

// Re-export commonly used math types for convenience
pub use orrery_math::{Vec3, Mat4};
