//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORRERY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
///
/// Distances, clip planes and the starting pose come from the loaded
/// system's view hints; these settings apply to every system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Track the n-th trackable body on start (0 starts in the overview)
    pub start_tracking: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            start_tracking: 0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Free camera movement speed (units per second)
    pub move_speed: f32,
    /// Free look, degrees per pixel
    pub mouse_sensitivity: f32,
    /// Overview orbit, degrees per pixel of left drag
    pub orbit_sensitivity: f32,
    /// Overview orbit, degrees per key press
    pub orbit_key_step: f32,
    /// Scene rotation, degrees per pixel of right drag
    pub scene_sensitivity: f32,
    /// Multiplier on the altitude-banded zoom step
    pub zoom_sensitivity: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 150.0,
            mouse_sensitivity: 0.1,
            orbit_sensitivity: 0.2,
            orbit_key_step: 5.0,
            scene_sensitivity: 0.1,
            zoom_sensitivity: 0.25,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RON system template to load
    pub scene_path: String,
    /// Built-in system used when the template cannot be loaded
    /// (`solar_system` or `classic`)
    pub fallback_preset: String,
    /// Simulated seconds per real second
    pub time_scale: f32,
    /// Start with the clock stopped
    pub start_paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scene_path: "scenes/solar_system.ron".to_string(),
            fallback_preset: "solar_system".to_string(),
            time_scale: 1.0,
            start_paused: false,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Sphere slices around the pole axis
    pub sphere_sectors: u32,
    /// Sphere bands from pole to pole
    pub sphere_stacks: u32,
    /// Colour of the orbit guides [r, g, b, a]
    pub orbit_color: [f32; 4],
    /// Draw orbit guides on start
    pub show_orbits: bool,
    /// Draw planetary rings
    pub show_rings: bool,
    /// Draw the starfield; when off the background colour is used
    pub show_sky: bool,
    /// Start with the nebula sky instead of deep space
    pub nebula_sky: bool,
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Specular light strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            sphere_sectors: 36,
            sphere_stacks: 18,
            orbit_color: [0.55, 0.55, 0.6, 0.45],
            show_orbits: true,
            show_rings: true,
            show_sky: true,
            nebula_sky: false,
            background_color: [0.0, 0.0, 0.0, 1.0],
            ambient_strength: 0.2,
            diffuse_strength: 1.0,
            specular_strength: 1.0,
            shininess: 50.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Put the overlay text in the window title
    pub show_overlay: bool,
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
