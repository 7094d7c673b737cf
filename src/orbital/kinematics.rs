//! Circular-orbit kinematics.
//!
//! Positions and spin angles are closed-form functions of elapsed scene
//! time: orbits are circular, coplanar in the XZ plane, and advance
//! counter-clockwise when seen from +Y. Satellites orbit their primary's
//! current position, so the per-frame step walks the catalog in
//! parent-before-satellite order.

use bevy::math::DVec3;
use bevy::prelude::*;
use std::f64::consts::TAU;

use crate::catalog::Catalog;
use crate::orbital::time::SceneClock;
use crate::settings::SceneSettings;

/// Days per model year.
///
/// Together with the time scales this fixes the pacing model: at unit
/// orbital time scale, one elapsed second advances every orbit by one
/// model day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Mutable per-frame state of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Scene-space position in display units.
    pub position: DVec3,
    /// Accumulated spin about +Y in radians.
    pub spin_rad: f64,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            spin_rad: 0.0,
        }
    }
}

/// Simulation state for every catalog body, index-aligned with the
/// catalog. Removed on scene teardown, which halts stepping.
#[derive(Resource, Debug, Clone)]
pub struct BodyStates {
    pub bodies: Vec<BodyState>,
}

impl BodyStates {
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            bodies: vec![BodyState::default(); catalog.len()],
        }
    }

    pub fn get(&self, index: usize) -> Option<&BodyState> {
        self.bodies.get(index)
    }
}

/// Orbit angle in radians after `elapsed_seconds`.
///
/// One revolution takes `orbital_period_years * DAYS_PER_YEAR /
/// orbital_time_scale` seconds of scene time.
pub fn orbit_angle_rad(
    elapsed_seconds: f64,
    orbital_period_years: f64,
    orbital_time_scale: f64,
) -> f64 {
    elapsed_seconds * TAU / (orbital_period_years * DAYS_PER_YEAR) * orbital_time_scale
}

/// Spin angle in radians after `elapsed_seconds`. A negative period spins
/// the body the other way (retrograde).
pub fn spin_angle_rad(
    elapsed_seconds: f64,
    rotation_period_days: f64,
    rotation_time_scale: f64,
) -> f64 {
    elapsed_seconds * TAU / rotation_period_days * rotation_time_scale
}

/// Offset from the primary at a given orbit angle.
///
/// Angle zero sits on +X; the orbit stays in the XZ plane and sweeps
/// toward -Z as the angle grows.
pub fn orbit_offset(angle_rad: f64, semi_major_axis_au: f64, au_scale: f64) -> DVec3 {
    let radius = semi_major_axis_au * au_scale;
    DVec3::new(angle_rad.cos() * radius, 0.0, -angle_rad.sin() * radius)
}

/// Recompute every body's position and spin for an absolute elapsed time.
///
/// `states` must be index-aligned with the catalog. The walk follows the
/// catalog's update order, so a satellite always reads its primary's
/// position for the same instant, never the previous frame's.
pub fn step(
    catalog: &Catalog,
    settings: &SceneSettings,
    elapsed_seconds: f64,
    states: &mut [BodyState],
) {
    for &index in catalog.update_order() {
        let spec = catalog.spec(index);
        let position = match catalog.parent_of(index) {
            None => DVec3::ZERO,
            Some(parent) => {
                let angle = orbit_angle_rad(
                    elapsed_seconds,
                    spec.orbital_period_years,
                    settings.orbital_time_scale,
                );
                states[parent].position
                    + orbit_offset(angle, spec.semi_major_axis_au, settings.au_scale)
            }
        };
        states[index] = BodyState {
            position,
            spin_rad: spin_angle_rad(
                elapsed_seconds,
                spec.rotation_period_days,
                settings.rotation_time_scale,
            ),
        };
    }
}

/// System to step the simulation at the current clock reading
pub fn run_step(
    catalog: Res<Catalog>,
    settings: Res<SceneSettings>,
    clock: Res<SceneClock>,
    mut states: ResMut<BodyStates>,
) {
    step(&catalog, &settings, clock.elapsed_seconds, &mut states.bodies);
}
