//! System templates
//!
//! A [`SystemTemplate`] is the serializable description of a solar system.
//! Templates are loaded from RON files and turned into a live
//! [`SolarSystem`] with [`SystemTemplate::instantiate`]. Bodies refer to
//! their parent by name, and a parent must be declared before its children.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::body::{Body, BodyFacts, BodyKind};
use crate::orbit::{Orbit, RingSystem, Spin};
use crate::overlay::Catalog;
use crate::system::{BodyKey, SolarSystem, SystemError};
use crate::view::ViewHints;

fn default_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

/// Serializable description of a single body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    /// Name of the body this one orbits
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub orbit: Option<Orbit>,
    #[serde(default)]
    pub spin: Spin,
    #[serde(default)]
    pub rings: Option<RingSystem>,
    #[serde(default)]
    pub facts: Option<BodyFacts>,
    #[serde(default)]
    pub tracking_height: Option<f32>,
    #[serde(default)]
    pub tracking_offset: Option<f32>,
}

impl BodyTemplate {
    /// Create a template with no parent, orbit, spin or rings
    pub fn new(name: impl Into<String>, kind: BodyKind, radius: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            radius,
            color: default_color(),
            parent: None,
            orbit: None,
            spin: Spin::default(),
            rings: None,
            facts: None,
            tracking_height: None,
            tracking_offset: None,
        }
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b, 1.0];
        self
    }

    pub fn orbiting(mut self, parent: impl Into<String>, orbit: Orbit) -> Self {
        self.parent = Some(parent.into());
        self.orbit = Some(orbit);
        self
    }

    pub fn with_spin(mut self, axial_tilt_deg: f32, rate_deg: f32) -> Self {
        self.spin = Spin::new(axial_tilt_deg, rate_deg);
        self
    }

    pub fn with_rings(mut self, rings: RingSystem) -> Self {
        self.rings = Some(rings);
        self
    }

    pub fn with_facts(mut self, orbital_speed_km_s: f32, mass_1e24_kg: f64, gravity_g: f32) -> Self {
        self.facts = Some(BodyFacts::new(orbital_speed_km_s, mass_1e24_kg, gravity_g));
        self
    }

    pub fn with_tracking_height(mut self, height: f32) -> Self {
        self.tracking_height = Some(height);
        self
    }

    pub fn with_tracking_offset(mut self, offset: f32) -> Self {
        self.tracking_offset = Some(offset);
        self
    }

    /// Build the runtime body, attaching it to `parent`
    fn to_body(&self, parent: Option<BodyKey>) -> Body {
        let mut body = Body::new(self.name.clone(), self.kind, self.radius).with_rgba(self.color);
        body.parent = parent;
        body.orbit = self.orbit;
        body.spin = self.spin;
        body.rings = self.rings.clone();
        body.facts = self.facts;
        body.tracking_height = self.tracking_height;
        body.tracking_offset = self.tracking_offset;
        body
    }
}

/// A serializable solar system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTemplate {
    /// System name (shown as the overlay heading)
    pub name: String,
    /// Body templates, parents before children
    pub bodies: Vec<BodyTemplate>,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub view: ViewHints,
}

impl SystemTemplate {
    /// Create an empty template
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
            catalog: Catalog::default(),
            view: ViewHints::default(),
        }
    }

    /// Load a template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateLoadError> {
        let contents = fs::read_to_string(path)?;
        let template = ron::from_str(&contents)?;
        Ok(template)
    }

    /// Save a template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TemplateSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }

    pub fn with_body(mut self, body: BodyTemplate) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn with_catalog(mut self, known_satellites: u32, known_comets: u32) -> Self {
        self.catalog = Catalog {
            known_satellites,
            known_comets,
        };
        self
    }

    pub fn with_view(mut self, view: ViewHints) -> Self {
        self.view = view;
        self
    }

    /// Build a live system from this template
    pub fn instantiate(&self) -> Result<SolarSystem, TemplateError> {
        let mut system = SolarSystem::new(self.name.clone())
            .with_catalog(self.catalog)
            .with_view_hints(self.view);
        let mut keys: HashMap<&str, BodyKey> = HashMap::with_capacity(self.bodies.len());

        for template in &self.bodies {
            let parent = match &template.parent {
                Some(name) => match keys.get(name.as_str()) {
                    Some(&key) => Some(key),
                    None => {
                        return Err(TemplateError::UnknownParent {
                            body: template.name.clone(),
                            parent: name.clone(),
                        })
                    }
                },
                None => None,
            };
            let key = system.add_body(template.to_body(parent))?;
            keys.insert(template.name.as_str(), key);
        }

        system.update(0.0);
        log::info!(
            "Instantiated system '{}' with {} bodies",
            self.name,
            system.len()
        );
        Ok(system)
    }
}

/// Error loading a template
#[derive(Debug)]
pub enum TemplateLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for TemplateLoadError {
    fn from(e: io::Error) -> Self {
        TemplateLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for TemplateLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        TemplateLoadError::Parse(e)
    }
}

impl std::fmt::Display for TemplateLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateLoadError::Io(e) => write!(f, "IO error: {}", e),
            TemplateLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for TemplateLoadError {}

/// Error saving a template
#[derive(Debug)]
pub enum TemplateSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for TemplateSaveError {
    fn from(e: io::Error) -> Self {
        TemplateSaveError::Io(e)
    }
}

impl From<ron::Error> for TemplateSaveError {
    fn from(e: ron::Error) -> Self {
        TemplateSaveError::Serialize(e)
    }
}

impl std::fmt::Display for TemplateSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSaveError::Io(e) => write!(f, "IO error: {}", e),
            TemplateSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for TemplateSaveError {}

/// Error turning a template into a live system
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// A body names a parent that was not declared before it
    UnknownParent { body: String, parent: String },
    /// The system rejected a body
    System(SystemError),
}

impl From<SystemError> for TemplateError {
    fn from(e: SystemError) -> Self {
        TemplateError::System(e)
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::UnknownParent { body, parent } => {
                write!(f, "Body '{}' orbits unknown parent '{}'", body, parent)
            }
            TemplateError::System(e) => write!(f, "System error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}
