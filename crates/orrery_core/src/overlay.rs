//! Overlay text
//!
//! The overlay is plain lines of text; how they reach the screen is up to the
//! application.

use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyKind};
use crate::system::SolarSystem;

/// Counts of objects that exist but are not modelled as bodies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub known_satellites: u32,
    pub known_comets: u32,
}

/// Summary lines shown while no body is tracked
pub fn overview_lines(system: &SolarSystem, catalog: &Catalog) -> Vec<String> {
    let stars = system.count(BodyKind::Star);
    let planets = system.count(BodyKind::Planet);
    let dwarfs = system.count(BodyKind::DwarfPlanet);
    let moons = system.count(BodyKind::Moon) as u32;

    let mut lines = vec![system.name().to_uppercase()];

    let mut star_line = format!("STARS: {}", stars);
    if stars == 1 {
        if let Some((_, star)) = system.star() {
            star_line.push_str(&format!(" ({})", star.name.to_uppercase()));
        }
    }
    lines.push(star_line);

    let mut planet_line = format!("PLANETS: {}", planets);
    if dwarfs > 0 {
        planet_line.push_str(&format!(" (+{} DWARF)", dwarfs));
    }
    lines.push(planet_line);

    lines.push(format!("SATELLITES: {}", catalog.known_satellites.max(moons)));
    lines.push(format!("COMETS: {}", catalog.known_comets));
    lines
}

/// Fact sheet for a single body
pub fn body_lines(body: &Body) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", body.kind.label(), body.name.to_uppercase())];
    if let Some(facts) = &body.facts {
        lines.push(format!(
            "Average Orbital Speed (km/s): {:.2}",
            facts.orbital_speed_km_s
        ));
        lines.push(format!("Mass (kg * 10^24): {}", facts.mass_1e24_kg));
        lines.push(format!("Gravity (g): {:.2}", facts.gravity_g));
    }
    lines
}
