//! Celestial body catalog.
//!
//! The catalog is the immutable side of the simulation: one [`BodySpec`]
//! per body, validated once at startup into a [`Catalog`] that the
//! kinematics and visualization layers read every frame. Physical values
//! follow the NASA planetary fact sheets; display-facing values (notably
//! the moon's orbit radius) are stylized for legibility at scene scale.

use anyhow::{Result, bail, ensure};
use bevy::prelude::*;
use std::collections::HashMap;

/// Static description of one celestial body.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub name: &'static str,
    /// Body this one orbits. `None` marks the central body.
    pub parent: Option<&'static str>,
    /// Physical mean radius in km. Informational only; display size is
    /// driven by `radius_earths`.
    pub mean_radius_km: f64,
    /// Radius relative to Earth.
    pub radius_earths: f64,
    /// Circular orbit radius in AU. Zero for the central body.
    pub semi_major_axis_au: f64,
    /// Revolution period in Earth years. Ignored for the central body.
    pub orbital_period_years: f64,
    /// Spin period in Earth days. Negative values spin retrograde.
    pub rotation_period_days: f64,
    /// Base material color, and the body's appearance when its texture
    /// cannot be loaded.
    pub color: [f32; 3],
    /// Texture path under the asset root.
    pub texture: &'static str,
}

/// The shipped scene: the sun, the eight planets, and Earth's moon.
///
/// The moon's orbit radius is a display value; the true 0.00257 AU would
/// put it inside Earth's inflated sphere.
pub const SOLAR_SYSTEM: &[BodySpec] = &[
    BodySpec {
        name: "Sun",
        parent: None,
        mean_radius_km: 695_700.0,
        radius_earths: 109.2,
        semi_major_axis_au: 0.0,
        orbital_period_years: 0.0,
        rotation_period_days: 25.38,
        color: [1.0, 0.85, 0.4],
        texture: "textures/sun.jpg",
    },
    BodySpec {
        name: "Mercury",
        parent: Some("Sun"),
        mean_radius_km: 2_439.7,
        radius_earths: 0.383,
        semi_major_axis_au: 0.387,
        orbital_period_years: 0.241,
        rotation_period_days: 58.646,
        color: [0.55, 0.52, 0.5],
        texture: "textures/mercury.jpg",
    },
    BodySpec {
        name: "Venus",
        parent: Some("Sun"),
        mean_radius_km: 6_051.8,
        radius_earths: 0.949,
        semi_major_axis_au: 0.723,
        orbital_period_years: 0.615,
        // Retrograde spin.
        rotation_period_days: -243.018,
        color: [0.9, 0.8, 0.6],
        texture: "textures/venus.jpg",
    },
    BodySpec {
        name: "Earth",
        parent: Some("Sun"),
        mean_radius_km: 6_371.0,
        radius_earths: 1.0,
        semi_major_axis_au: 1.0,
        orbital_period_years: 1.0,
        rotation_period_days: 0.997,
        color: [0.2, 0.4, 0.8],
        texture: "textures/earth.jpg",
    },
    BodySpec {
        name: "Moon",
        parent: Some("Earth"),
        mean_radius_km: 1_737.4,
        radius_earths: 0.273,
        semi_major_axis_au: 0.1,
        orbital_period_years: 0.0748,
        // Tidally locked: spin period equals orbital period.
        rotation_period_days: 27.322,
        color: [0.6, 0.6, 0.6],
        texture: "textures/moon.jpg",
    },
    BodySpec {
        name: "Mars",
        parent: Some("Sun"),
        mean_radius_km: 3_389.5,
        radius_earths: 0.532,
        semi_major_axis_au: 1.524,
        orbital_period_years: 1.881,
        rotation_period_days: 1.026,
        color: [0.8, 0.4, 0.25],
        texture: "textures/mars.jpg",
    },
    BodySpec {
        name: "Jupiter",
        parent: Some("Sun"),
        mean_radius_km: 69_911.0,
        radius_earths: 10.97,
        semi_major_axis_au: 5.203,
        orbital_period_years: 11.862,
        rotation_period_days: 0.414,
        color: [0.8, 0.7, 0.55],
        texture: "textures/jupiter.jpg",
    },
    BodySpec {
        name: "Saturn",
        parent: Some("Sun"),
        mean_radius_km: 58_232.0,
        radius_earths: 9.14,
        semi_major_axis_au: 9.537,
        orbital_period_years: 29.457,
        rotation_period_days: 0.444,
        color: [0.9, 0.83, 0.65],
        texture: "textures/saturn.jpg",
    },
    BodySpec {
        name: "Uranus",
        parent: Some("Sun"),
        mean_radius_km: 25_362.0,
        radius_earths: 3.98,
        semi_major_axis_au: 19.191,
        orbital_period_years: 84.011,
        // Retrograde spin.
        rotation_period_days: -0.718,
        color: [0.6, 0.85, 0.9],
        texture: "textures/uranus.jpg",
    },
    BodySpec {
        name: "Neptune",
        parent: Some("Sun"),
        mean_radius_km: 24_622.0,
        radius_earths: 3.87,
        semi_major_axis_au: 30.069,
        orbital_period_years: 164.79,
        rotation_period_days: 0.671,
        color: [0.3, 0.45, 0.9],
        texture: "textures/neptune.jpg",
    },
];

/// Validated body table plus the derived structure the simulation needs:
/// parent indices and a parent-before-satellite update order.
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    specs: Vec<BodySpec>,
    index_by_name: HashMap<&'static str, usize>,
    parent_index: Vec<Option<usize>>,
    update_order: Vec<usize>,
    central: usize,
}

impl Catalog {
    /// Validates a body table and derives its update order.
    ///
    /// Rejected defects: empty tables, duplicate or empty names, unknown
    /// parents, zero or multiple central bodies, parent cycles, and
    /// non-finite or degenerate constants (zero periods, non-positive
    /// radii, non-positive orbit radii on orbiting bodies).
    pub fn assemble(specs: &[BodySpec]) -> Result<Self> {
        ensure!(!specs.is_empty(), "Catalog is empty");

        let mut index_by_name = HashMap::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            ensure!(!spec.name.is_empty(), "Body at index {} has an empty name", index);
            if index_by_name.insert(spec.name, index).is_some() {
                bail!("Duplicate body name '{}'", spec.name);
            }
        }

        let mut central = None;
        let mut parent_index = Vec::with_capacity(specs.len());
        for spec in specs {
            match spec.parent {
                None => {
                    if let Some(first) = central {
                        bail!(
                            "Multiple central bodies: '{}' and '{}'",
                            specs[first].name,
                            spec.name
                        );
                    }
                    central = Some(parent_index.len());
                    parent_index.push(None);
                }
                Some(parent) => {
                    let Some(&resolved) = index_by_name.get(parent) else {
                        bail!("Body '{}' orbits unknown body '{}'", spec.name, parent);
                    };
                    ensure!(
                        parent != spec.name,
                        "Body '{}' cannot orbit itself",
                        spec.name
                    );
                    parent_index.push(Some(resolved));
                }
            }
        }
        let Some(central) = central else {
            bail!("Catalog has no central body (every body names a parent)");
        };

        for (index, spec) in specs.iter().enumerate() {
            ensure!(
                spec.mean_radius_km.is_finite() && spec.mean_radius_km > 0.0,
                "Body '{}' has a non-positive mean radius",
                spec.name
            );
            ensure!(
                spec.radius_earths.is_finite() && spec.radius_earths > 0.0,
                "Body '{}' has a non-positive radius",
                spec.name
            );
            ensure!(
                spec.rotation_period_days.is_finite() && spec.rotation_period_days != 0.0,
                "Body '{}' has a zero rotation period",
                spec.name
            );
            if index == central {
                ensure!(
                    spec.semi_major_axis_au == 0.0,
                    "Central body '{}' must have a zero orbit radius",
                    spec.name
                );
            } else {
                ensure!(
                    spec.semi_major_axis_au.is_finite() && spec.semi_major_axis_au > 0.0,
                    "Body '{}' has a non-positive orbit radius",
                    spec.name
                );
                ensure!(
                    spec.orbital_period_years.is_finite() && spec.orbital_period_years != 0.0,
                    "Body '{}' has a zero orbital period",
                    spec.name
                );
            }
        }

        // Kahn-style ordering over the parent forest. A body is placed once
        // its parent is placed, so satellites always step after their
        // primary. Failure to place every body means a parent cycle.
        let mut update_order = Vec::with_capacity(specs.len());
        let mut placed = vec![false; specs.len()];
        update_order.push(central);
        placed[central] = true;
        while update_order.len() < specs.len() {
            let before = update_order.len();
            for index in 0..specs.len() {
                if !placed[index] && parent_index[index].is_some_and(|p| placed[p]) {
                    update_order.push(index);
                    placed[index] = true;
                }
            }
            if update_order.len() == before {
                let stuck: Vec<&str> = specs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !placed[*i])
                    .map(|(_, s)| s.name)
                    .collect();
                bail!("Parent cycle among bodies: {}", stuck.join(", "));
            }
        }

        Ok(Self {
            specs: specs.to_vec(),
            index_by_name,
            parent_index,
            update_order,
            central,
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn spec(&self, index: usize) -> &BodySpec {
        &self.specs[index]
    }

    /// Specs in declaration order, index-aligned with the state vector.
    pub fn specs(&self) -> impl Iterator<Item = &BodySpec> {
        self.specs.iter()
    }

    #[allow(dead_code)]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.parent_index[index]
    }

    /// Body indices ordered so every primary precedes its satellites.
    pub fn update_order(&self) -> &[usize] {
        &self.update_order
    }

    pub fn central(&self) -> usize {
        self.central
    }

    pub fn is_central(&self, index: usize) -> bool {
        index == self.central
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &'static str, parent: Option<&'static str>) -> BodySpec {
        BodySpec {
            name,
            parent,
            mean_radius_km: 1000.0,
            radius_earths: 1.0,
            semi_major_axis_au: if parent.is_some() { 1.0 } else { 0.0 },
            orbital_period_years: 1.0,
            rotation_period_days: 1.0,
            color: [1.0, 1.0, 1.0],
            texture: "textures/test.jpg",
        }
    }

    #[test]
    fn test_solar_system_assembles() {
        let catalog = Catalog::assemble(SOLAR_SYSTEM).expect("shipped catalog should be valid");
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.central(), catalog.index_of("Sun").unwrap());
        let moon = catalog.index_of("Moon").unwrap();
        assert_eq!(catalog.parent_of(moon), catalog.index_of("Earth"));
    }

    #[test]
    fn test_update_order_places_parents_first() {
        let catalog = Catalog::assemble(SOLAR_SYSTEM).expect("valid catalog");
        let order = catalog.update_order();
        assert_eq!(order.len(), catalog.len());
        assert_eq!(order[0], catalog.central());
        let position =
            |index: usize| order.iter().position(|&i| i == index).expect("body in order");
        for index in 0..catalog.len() {
            if let Some(parent) = catalog.parent_of(index) {
                assert!(
                    position(parent) < position(index),
                    "{} must step before {}",
                    catalog.spec(parent).name,
                    catalog.spec(index).name
                );
            }
        }
    }

    #[test]
    fn test_update_order_ignores_declaration_order() {
        // Moon declared before its primary still steps after it.
        let specs = [body("Moon", Some("Earth")), body("Earth", Some("Sun")), body("Sun", None)];
        let catalog = Catalog::assemble(&specs).expect("valid catalog");
        assert_eq!(catalog.update_order(), &[2, 1, 0]);
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(Catalog::assemble(&[]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let specs = [body("Sun", None), body("Earth", Some("Sun")), body("Earth", Some("Sun"))];
        let err = Catalog::assemble(&specs).unwrap_err();
        assert!(err.to_string().contains("Duplicate"), "{err}");
    }

    #[test]
    fn test_rejects_unknown_parent() {
        let specs = [body("Sun", None), body("Earth", Some("Sol"))];
        let err = Catalog::assemble(&specs).unwrap_err();
        assert!(err.to_string().contains("unknown body 'Sol'"), "{err}");
    }

    #[test]
    fn test_rejects_missing_central_body() {
        let specs = [body("A", Some("B")), body("B", Some("A"))];
        assert!(Catalog::assemble(&specs).is_err());
    }

    #[test]
    fn test_rejects_multiple_central_bodies() {
        let specs = [body("Sun", None), body("Nemesis", None)];
        let err = Catalog::assemble(&specs).unwrap_err();
        assert!(err.to_string().contains("Multiple central"), "{err}");
    }

    #[test]
    fn test_rejects_parent_cycle() {
        let specs = [body("Sun", None), body("A", Some("B")), body("B", Some("A"))];
        let err = Catalog::assemble(&specs).unwrap_err();
        assert!(err.to_string().contains("cycle"), "{err}");
    }

    #[test]
    fn test_rejects_self_orbit() {
        let specs = [body("Sun", None), body("Ouroboros", Some("Ouroboros"))];
        assert!(Catalog::assemble(&specs).is_err());
    }

    #[test]
    fn test_rejects_zero_orbital_period() {
        let mut earth = body("Earth", Some("Sun"));
        earth.orbital_period_years = 0.0;
        let err = Catalog::assemble(&[body("Sun", None), earth]).unwrap_err();
        assert!(err.to_string().contains("orbital period"), "{err}");
    }

    #[test]
    fn test_rejects_zero_rotation_period() {
        let mut earth = body("Earth", Some("Sun"));
        earth.rotation_period_days = 0.0;
        let err = Catalog::assemble(&[body("Sun", None), earth]).unwrap_err();
        assert!(err.to_string().contains("rotation period"), "{err}");
    }

    #[test]
    fn test_rejects_central_body_with_orbit_radius() {
        let mut sun = body("Sun", None);
        sun.semi_major_axis_au = 1.0;
        let err = Catalog::assemble(&[sun, body("Earth", Some("Sun"))]).unwrap_err();
        assert!(err.to_string().contains("zero orbit radius"), "{err}");
    }

    #[test]
    fn test_rejects_non_finite_constants() {
        let mut earth = body("Earth", Some("Sun"));
        earth.semi_major_axis_au = f64::NAN;
        assert!(Catalog::assemble(&[body("Sun", None), earth]).is_err());
    }
}
