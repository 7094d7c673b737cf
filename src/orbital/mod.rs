//! Orbital kinematics module
//!
//! This module owns the scene clock and the per-frame kinematics step
//! that recomputes every body's position and spin from elapsed time.

use bevy::prelude::*;

pub mod kinematics;
pub mod time;

pub use kinematics::{BodyState, BodyStates, run_step, step};
pub use time::{SceneClock, advance_scene_clock};

use crate::catalog::Catalog;
use crate::settings::SceneSettings;

/// Plugin for the scene clock and kinematics stepping
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_simulation).add_systems(
            Update,
            (
                time::clock_controls,
                advance_scene_clock.after(time::clock_controls),
                run_step
                    .after(advance_scene_clock)
                    .run_if(resource_exists::<BodyStates>),
            ),
        );
    }
}

/// Startup system creating the clock and the per-body state vector.
fn init_simulation(mut commands: Commands, catalog: Res<Catalog>, settings: Res<SceneSettings>) {
    commands.insert_resource(SceneClock::from_settings(&settings));
    commands.insert_resource(BodyStates::for_catalog(&catalog));
    info!(
        "Simulating {} bodies around {}",
        catalog.len(),
        catalog.spec(catalog.central()).name
    );
}
