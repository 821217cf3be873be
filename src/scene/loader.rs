//! Startup system loading
//!
//! The configured RON template is tried first. A template that is missing,
//! malformed or fails validation falls back to a built-in preset so the
//! viewer always has something to show.

use std::path::Path;

use orrery_core::{SolarSystem, SystemTemplate, SystemValidator, TemplateError};

use super::SystemBuilder;
use crate::config::SimulationConfig;

/// Load the configured system, falling back to the configured preset
pub fn load_system(config: &SimulationConfig) -> Result<SolarSystem, TemplateError> {
    match load_template(&config.scene_path) {
        Some(system) => Ok(system),
        None => {
            log::warn!("Using built-in '{}' system", config.fallback_preset);
            fallback(&config.fallback_preset).build()
        }
    }
}

fn load_template(path: impl AsRef<Path>) -> Option<SolarSystem> {
    let path = path.as_ref();
    let template = match SystemTemplate::load(path) {
        Ok(template) => template,
        Err(e) => {
            log::warn!("Failed to load system '{}': {}", path.display(), e);
            return None;
        }
    };

    let errors = SystemValidator::validate(&template);
    if !errors.is_empty() {
        for error in &errors {
            log::warn!("{}: {}", path.display(), error);
        }
        return None;
    }

    match template.instantiate() {
        Ok(system) => Some(system),
        Err(e) => {
            log::warn!("Failed to instantiate '{}': {}", path.display(), e);
            None
        }
    }
}

fn fallback(preset: &str) -> SystemBuilder {
    SystemBuilder::preset(preset).unwrap_or_else(|| {
        log::warn!("Unknown preset '{}', using solar_system", preset);
        SystemBuilder::solar_system()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(scene_path: &str, preset: &str) -> SimulationConfig {
        SimulationConfig {
            scene_path: scene_path.to_string(),
            fallback_preset: preset.to_string(),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_missing_file_uses_preset() {
        let system = load_system(&config("does/not/exist.ron", "classic")).unwrap();
        assert!(system.find_by_name("Pluto").is_some());
    }

    #[test]
    fn test_unknown_preset_uses_solar_system() {
        let system = load_system(&config("does/not/exist.ron", "nonsense")).unwrap();
        assert_eq!(system.name(), "Solar System");
        assert!(system.find_by_name("Moon").is_some());
    }

    #[test]
    fn test_shipped_scene_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/solar_system.ron");
        let system = load_system(&config(path, "classic")).unwrap();
        assert!(system.find_by_name("Saturn").is_some());
        assert!(system.find_by_name("Pluto").is_none());
    }
}
