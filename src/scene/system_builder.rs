//! SystemBuilder - Declarative system construction
//!
//! Provides a fluent API for building system templates, plus the two
//! built-in layouts. Both presets are also shipped as RON files under
//! `scenes/`.

use orrery_core::{
    BodyKind, BodyTemplate, Orbit, RingSystem, SolarSystem, SystemTemplate, TemplateError,
    ViewHints,
};

/// Degrees per second for an angular speed given in radians per second
const RAD_PER_SEC: f32 = 57.295_78;

/// Shared scale on the planets' listed orbital speeds (Mercury: 0.1 rad/s)
const PLANET_SPEED: f32 = 0.1;

/// The fixed-function layout advanced its angle by 0.5 degrees every 16 ms tick
const CLASSIC_TICKS_PER_SEC: f32 = 62.5;
const CLASSIC_DEG_PER_SEC: f32 = 0.5 * CLASSIC_TICKS_PER_SEC;

/// Builder for constructing system templates
///
/// # Example
/// ```ignore
/// let system = SystemBuilder::new("Binary")
///     .with_star("Sun", 10.0, [1.0, 0.9, 0.4], 2.0)
///     .add_body(BodyTemplate::new("Rock", BodyKind::Planet, 1.0)
///         .orbiting("Sun", Orbit::circular(40.0, 12.0)))
///     .build()?;
/// ```
pub struct SystemBuilder {
    template: SystemTemplate,
}

impl SystemBuilder {
    /// Create a builder for an empty system
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            template: SystemTemplate::new(name),
        }
    }

    /// Add an unlit star at the origin
    pub fn with_star(self, name: &str, radius: f32, color: [f32; 3], spin_rate_deg: f32) -> Self {
        self.add_body(
            BodyTemplate::new(name, BodyKind::Star, radius)
                .with_color(color[0], color[1], color[2])
                .with_spin(0.0, spin_rate_deg),
        )
    }

    /// Add any body; parents must be added before their children
    pub fn add_body(mut self, body: BodyTemplate) -> Self {
        self.template.add_body(body);
        self
    }

    /// Set the overlay catalog counts
    pub fn with_catalog(mut self, known_satellites: u32, known_comets: u32) -> Self {
        self.template = self.template.with_catalog(known_satellites, known_comets);
        self
    }

    /// Set the camera framing hints
    pub fn with_view(mut self, view: ViewHints) -> Self {
        self.template = self.template.with_view(view);
        self
    }

    /// Template built so far
    pub fn template(&self) -> &SystemTemplate {
        &self.template
    }

    pub fn into_template(self) -> SystemTemplate {
        self.template
    }

    /// Instantiate the system
    pub fn build(self) -> Result<SolarSystem, TemplateError> {
        self.template.instantiate()
    }

    /// Look up a built-in layout by name (`solar_system` or `classic`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "solar_system" | "solar-system" | "default" => Some(Self::solar_system()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Eight planets, Earth's Moon and Saturn's rings at display scale
    ///
    /// Planets sit at `130 * n` for n = 2..9 around a Sun of radius 100.
    /// Orbital speeds are listed as multiples of [`PLANET_SPEED`] radians per
    /// second and spins in degrees per second; negative spins turn against
    /// the orbital direction.
    pub fn solar_system() -> Self {
        // name, orbit radius, speed factor, radius, tilt, spin, colour,
        // km/s, 10^24 kg, g, tracking offset
        const PLANETS: [(&str, f32, f32, f32, f32, f32, [f32; 3], f32, f64, f32, f32); 8] = [
            ("Mercury", 260.0, 1.0, 10.0, 0.0, -4.5, [0.62, 0.6, 0.57], 47.87, 0.32868, 0.38, 195.0),
            ("Venus", 390.0, 0.75, 12.0, 132.5, -1.59, [0.9, 0.78, 0.52], 35.02, 4.8675, 0.90, 150.0),
            ("Earth", 520.0, 0.55, 11.8, 33.25, -66.5, [0.26, 0.47, 0.86], 29.76, 5.976, 1.0, 140.0),
            ("Mars", 650.0, 0.35, 8.0, 32.4, -68.04, [0.8, 0.36, 0.2], 24.13, 0.63345, 0.38, 70.0),
            ("Jupiter", 780.0, 0.2, 40.0, 23.5, -105.75, [0.82, 0.69, 0.52], 13.07, 1876.64328, 2.55, 195.0),
            ("Saturn", 910.0, 0.15, 37.0, 34.7, -155.456, [0.9, 0.8, 0.56], 9.67, 561.80376, 1.12, 195.0),
            ("Uranus", 1040.0, 0.1, 30.0, 99.0, -445.5, [0.62, 0.85, 0.9], 6.84, 86.0544, 0.97, 195.0),
            ("Neptune", 1170.0, 0.08, 30.0, 30.2, -120.8, [0.3, 0.45, 0.9], 5.48, 101.592, 1.17, 195.0),
        ];

        let mut builder = Self::new("Solar System")
            .with_star("Sun", 100.0, [1.0, 0.85, 0.35], 5.875)
            .with_catalog(415, 3441)
            .with_view(ViewHints::default());

        for (name, distance, factor, radius, tilt, spin, color, km_s, mass, gravity, offset) in PLANETS {
            let speed = PLANET_SPEED * factor * RAD_PER_SEC;
            let mut planet = BodyTemplate::new(name, BodyKind::Planet, radius)
                .with_color(color[0], color[1], color[2])
                .orbiting("Sun", Orbit::circular(distance, speed))
                .with_spin(tilt, spin)
                .with_facts(km_s, mass, gravity)
                .with_tracking_offset(offset);

            match name {
                // Small enough that the default height loses it below the frame
                "Mars" => planet = planet.with_tracking_height(20.0),
                "Saturn" => {
                    planet = planet.with_rings(RingSystem {
                        inner_radius: 55.0,
                        count: 25,
                        spacing: 1.0,
                        gap_index: Some(15),
                        gap_width: 3.0,
                        tilt_deg: 30.0,
                        color: [0.8, 0.72, 0.55, 0.6],
                    })
                }
                _ => {}
            }

            builder = builder.add_body(planet);
            if name == "Earth" {
                builder = builder.add_body(
                    BodyTemplate::new("Moon", BodyKind::Moon, 5.5)
                        .with_color(0.7, 0.7, 0.7)
                        .orbiting("Earth", Orbit::circular(65.0, 387.03))
                        .with_spin(32.4, -100.44),
                );
            }
        }

        builder
    }

    /// The fixed-function layout: a unit Sun, nine planets from 3 to 24
    /// units out and one small moon per planet on an inclined orbit
    ///
    /// Every planet and moon starts on +X.
    pub fn classic() -> Self {
        // name, kind, distance, radius, speed factor, colour, moon inclination
        const PLANETS: [(&str, BodyKind, f32, f32, f32, [f32; 3], f32); 9] = [
            ("Mercury", BodyKind::Planet, 3.0, 0.2, 4.7, [0.62, 0.6, 0.57], 7.0),
            ("Venus", BodyKind::Planet, 5.0, 0.3, 3.5, [0.9, 0.78, 0.52], 3.4),
            ("Earth", BodyKind::Planet, 7.0, 0.3, 3.0, [0.26, 0.47, 0.86], 0.0),
            ("Mars", BodyKind::Planet, 9.0, 0.2, 2.5, [0.8, 0.36, 0.2], 1.85),
            ("Jupiter", BodyKind::Planet, 12.0, 0.6, 1.3, [0.82, 0.69, 0.52], 1.3),
            ("Saturn", BodyKind::Planet, 15.0, 0.5, 1.0, [0.9, 0.8, 0.56], 2.5),
            ("Uranus", BodyKind::Planet, 18.0, 0.4, 0.7, [0.62, 0.85, 0.9], 0.8),
            ("Neptune", BodyKind::Planet, 21.0, 0.4, 0.5, [0.3, 0.45, 0.9], 1.77),
            ("Pluto", BodyKind::DwarfPlanet, 24.0, 0.1, 0.2, [0.76, 0.7, 0.64], 17.16),
        ];
        // Phase that puts (sin, 0, cos) on +X at t = 0
        const START_ON_X: f32 = 90.0;

        let mut builder = Self::new("Solar System")
            .with_star("Sun", 1.0, [1.0, 0.85, 0.35], 0.5 * CLASSIC_DEG_PER_SEC)
            .with_catalog(415, 3441)
            .with_view(ViewHints {
                distance: 30.0,
                min_distance: 5.0,
                max_distance: 100.0,
                azimuth_deg: 0.0,
                elevation_deg: 15.0,
                tracking_offset: 4.0,
                zoom_unit: 0.05,
                near: 0.1,
                far: 200.0,
            });

        for (i, (name, kind, distance, radius, factor, color, inclination)) in
            PLANETS.into_iter().enumerate()
        {
            let rate = factor * CLASSIC_DEG_PER_SEC;
            let i = i as f32;
            builder = builder
                .add_body(
                    BodyTemplate::new(name, kind, radius)
                        .with_color(color[0], color[1], color[2])
                        .orbiting("Sun", Orbit::circular(distance, rate).with_phase(START_ON_X))
                        .with_spin(0.0, rate)
                        .with_tracking_height(1.0),
                )
                .add_body(
                    BodyTemplate::new(format!("{} I", name), BodyKind::Moon, 0.1 * radius)
                        .with_color(0.7, 0.7, 0.7)
                        .orbiting(
                            name,
                            Orbit::circular(1.5 + 0.5 * i, (0.5 + 0.1 * i) * CLASSIC_TICKS_PER_SEC)
                                .with_phase(START_ON_X)
                                .with_inclination(inclination),
                        )
                        .with_spin(0.0, (1.0 + 0.2 * i) * CLASSIC_TICKS_PER_SEC),
                );
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::SystemValidator;

    #[test]
    fn test_empty_builder() {
        let builder = SystemBuilder::new("Empty");
        assert!(builder.template().bodies.is_empty());
        assert_eq!(builder.template().name, "Empty");
    }

    #[test]
    fn test_custom_system() {
        let system = SystemBuilder::new("Binary")
            .with_star("Sun", 10.0, [1.0, 0.9, 0.4], 2.0)
            .add_body(
                BodyTemplate::new("Rock", BodyKind::Planet, 1.0)
                    .orbiting("Sun", Orbit::circular(40.0, 12.0)),
            )
            .build()
            .unwrap();
        assert_eq!(system.len(), 2);
        assert!(system.star().is_some());
    }

    #[test]
    fn test_unknown_parent_fails() {
        let result = SystemBuilder::new("Broken")
            .add_body(
                BodyTemplate::new("Rock", BodyKind::Planet, 1.0)
                    .orbiting("Nowhere", Orbit::circular(4.0, 1.0)),
            )
            .build();
        assert!(matches!(result, Err(TemplateError::UnknownParent { .. })));
    }

    #[test]
    fn test_solar_system_preset() {
        let builder = SystemBuilder::solar_system();
        assert!(SystemValidator::validate(builder.template()).is_empty());
        let system = builder.build().unwrap();
        assert_eq!(system.len(), 10);
        assert_eq!(system.count(BodyKind::Planet), 8);
        assert_eq!(system.count(BodyKind::Moon), 1);
        assert_eq!(system.trackable().len(), 8);
        assert_eq!(system.catalog().known_satellites, 415);

        let (_, saturn) = system.find_by_name("saturn").unwrap();
        assert_eq!(saturn.rings.as_ref().map(|r| r.count), Some(25));
        let (_, mars) = system.find_by_name("Mars").unwrap();
        assert_eq!(mars.tracking_height, Some(20.0));
        assert_eq!(mars.tracking_offset, Some(70.0));
    }

    #[test]
    fn test_solar_system_orbital_speeds() {
        let system = SystemBuilder::solar_system().build().unwrap();
        let speed = |name: &str| system.find_by_name(name).unwrap().1.orbit.unwrap().speed_deg;

        // Mercury turns 0.1 rad/s, a full orbit in about 63 s
        assert!((speed("Mercury") - 5.7296).abs() < 1e-3);
        assert!((360.0 / speed("Mercury") - 62.83).abs() < 0.01);
        assert!((speed("Neptune") - 0.4584).abs() < 1e-3);

        // The Moon laps Earth about 123 times per Earth year
        let ratio = speed("Moon") / speed("Earth");
        assert!((ratio - 67.55 / 0.55).abs() < 0.1, "ratio {}", ratio);
    }

    #[test]
    fn test_solar_system_planets_ordered_outward() {
        let template = SystemBuilder::solar_system().into_template();
        let distances: Vec<f32> = template
            .bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Planet)
            .filter_map(|b| b.orbit.map(|o| o.semi_major))
            .collect();
        assert_eq!(distances.len(), 8);
        for (n, d) in distances.iter().enumerate() {
            assert_eq!(*d, 130.0 * (n as f32 + 2.0));
        }
    }

    #[test]
    fn test_classic_preset() {
        let builder = SystemBuilder::classic();
        assert!(SystemValidator::validate(builder.template()).is_empty());
        let system = builder.build().unwrap();
        // Sun, nine planets, nine moons
        assert_eq!(system.len(), 19);
        assert_eq!(system.count(BodyKind::Moon), 9);
        assert_eq!(system.count(BodyKind::DwarfPlanet), 1);
        assert_eq!(system.trackable().len(), 9);
        assert_eq!(system.view_hints().distance, 30.0);
    }

    #[test]
    fn test_classic_starts_on_x_axis() {
        let system = SystemBuilder::classic().build().unwrap();
        let (_, earth) = system.find_by_name("Earth").unwrap();
        let p = earth.position();
        assert!((p.x - 7.0).abs() < 1e-4);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_classic_moon_sizes() {
        let system = SystemBuilder::classic().build().unwrap();
        let (_, jupiter) = system.find_by_name("Jupiter").unwrap();
        let (_, moon) = system.find_by_name("Jupiter I").unwrap();
        assert!((moon.radius - 0.1 * jupiter.radius).abs() < 1e-6);
        assert_eq!(moon.orbit.map(|o| o.inclination_deg), Some(1.3));
    }

    #[test]
    fn test_preset_lookup() {
        assert!(SystemBuilder::preset("classic").is_some());
        assert!(SystemBuilder::preset("Solar_System").is_some());
        assert!(SystemBuilder::preset("andromeda").is_none());
    }
}
