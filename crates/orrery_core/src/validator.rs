//! System validation
//!
//! Checks a [`SystemTemplate`] for authoring mistakes before it is
//! instantiated: empty systems, duplicate or dangling names, and geometry
//! that cannot be drawn.

use std::collections::HashSet;

use crate::body::BodyKind;
use crate::orbit::MAX_RING_COUNT;
use crate::template::SystemTemplate;

/// Validation error found in a template
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Template has no bodies
    EmptySystem,
    /// No body of kind `Star`
    MissingStar,
    /// Duplicate body name found
    DuplicateName(String),
    /// Parent is unknown or declared after the child
    UnknownParent { body: String, parent: String },
    /// Moon without a parent
    OrphanMoon(String),
    /// Radius is zero, negative or not finite
    NonPositiveRadius(String),
    /// Orbit axis is negative, or an orbit angle or speed is not finite
    InvalidOrbit(String),
    /// Ring geometry is negative or not finite, or there are too many loops
    InvalidRings(String),
    /// Spin tilt or rate is not finite
    InvalidSpin(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptySystem => write!(f, "System has no bodies"),
            ValidationError::MissingStar => write!(f, "System has no star"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate body name: '{}'", name)
            }
            ValidationError::UnknownParent { body, parent } => {
                write!(f, "Body '{}' orbits '{}', which is not declared before it", body, parent)
            }
            ValidationError::OrphanMoon(name) => {
                write!(f, "Moon '{}' has no parent", name)
            }
            ValidationError::NonPositiveRadius(name) => {
                write!(f, "Body '{}' has a non-positive radius", name)
            }
            ValidationError::InvalidOrbit(name) => {
                write!(f, "Body '{}' has an invalid orbit", name)
            }
            ValidationError::InvalidRings(name) => {
                write!(f, "Body '{}' has invalid rings", name)
            }
            ValidationError::InvalidSpin(name) => {
                write!(f, "Body '{}' has an invalid spin", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validator for [`SystemTemplate`]s
///
/// # Example
/// ```ignore
/// let errors = SystemValidator::validate(&template);
/// for error in &errors {
///     log::warn!("{}", error);
/// }
/// ```
pub struct SystemValidator;

impl SystemValidator {
    /// Validate a template, returning all errors found
    pub fn validate(template: &SystemTemplate) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if template.bodies.is_empty() {
            errors.push(ValidationError::EmptySystem);
            return errors;
        }

        if !template.bodies.iter().any(|b| b.kind == BodyKind::Star) {
            errors.push(ValidationError::MissingStar);
        }

        let mut seen = HashSet::new();
        for body in &template.bodies {
            match &body.parent {
                Some(parent) if !seen.contains(parent.as_str()) => {
                    errors.push(ValidationError::UnknownParent {
                        body: body.name.clone(),
                        parent: parent.clone(),
                    });
                }
                None if body.kind == BodyKind::Moon => {
                    errors.push(ValidationError::OrphanMoon(body.name.clone()));
                }
                _ => {}
            }

            if !seen.insert(body.name.as_str()) {
                errors.push(ValidationError::DuplicateName(body.name.clone()));
            }

            if !(body.radius.is_finite() && body.radius > 0.0) {
                errors.push(ValidationError::NonPositiveRadius(body.name.clone()));
            }

            if let Some(orbit) = &body.orbit {
                let axes_ok = [orbit.semi_major, orbit.semi_minor]
                    .iter()
                    .all(|a| a.is_finite() && *a >= 0.0);
                let angles_ok = [orbit.speed_deg, orbit.phase_deg, orbit.inclination_deg]
                    .iter()
                    .all(|a| a.is_finite());
                if !axes_ok || !angles_ok {
                    errors.push(ValidationError::InvalidOrbit(body.name.clone()));
                }
            }

            if let Some(rings) = &body.rings {
                let ok = rings.inner_radius.is_finite()
                    && rings.inner_radius > 0.0
                    && rings.spacing.is_finite()
                    && rings.spacing >= 0.0
                    && rings.gap_width.is_finite()
                    && rings.gap_width >= 0.0
                    && rings.tilt_deg.is_finite()
                    && rings.count <= MAX_RING_COUNT;
                if !ok {
                    errors.push(ValidationError::InvalidRings(body.name.clone()));
                }
            }

            if !(body.spin.axial_tilt_deg.is_finite() && body.spin.rate_deg.is_finite()) {
                errors.push(ValidationError::InvalidSpin(body.name.clone()));
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(template: &SystemTemplate) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(template);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
