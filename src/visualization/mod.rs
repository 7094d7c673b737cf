//! Visualization module
//!
//! This module assembles the rendered scene (body spheres, orbit rings)
//! and keeps it synced to the simulation. The whole scene can be torn
//! down and rebuilt at runtime without touching the catalog or the clock.

use bevy::prelude::*;

pub mod bodies;
pub mod rings;

pub use bodies::{SceneBody, SceneEntity, display_radius, spawn_bodies, sync_body_transforms};
pub use rings::{RingAroundBody, orbit_ring_mesh, recenter_satellite_rings, spawn_orbit_rings};

use crate::catalog::Catalog;
use crate::orbital::{BodyStates, run_step};

/// Tear down every scene entity and halt stepping. Idempotent: clearing
/// an empty scene does nothing.
#[derive(Message)]
pub struct ClearScene;

/// Rebuild a previously cleared scene from the retained catalog. Ignored
/// while the scene is alive.
#[derive(Message)]
pub struct RebuildScene;

/// Plugin for scene assembly and per-frame visual updates
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ClearScene>()
            .add_message::<RebuildScene>()
            .add_systems(Startup, (spawn_bodies, spawn_orbit_rings))
            .add_systems(
                Update,
                (
                    sync_body_transforms
                        .after(run_step)
                        .run_if(resource_exists::<BodyStates>),
                    recenter_satellite_rings
                        .after(run_step)
                        .run_if(resource_exists::<BodyStates>),
                    bodies::handle_texture_load_failures,
                    clear_scene,
                    rebuild_scene.after(clear_scene),
                ),
            );
    }
}

/// Despawn the scene and drop the per-body state so stepping stops. The
/// catalog, settings, and clock survive for a later rebuild.
fn clear_scene(
    mut messages: MessageReader<ClearScene>,
    scene: Query<Entity, With<SceneEntity>>,
    mut commands: Commands,
) {
    if messages.is_empty() {
        return;
    }
    messages.clear();

    let mut count = 0;
    for entity in &scene {
        commands.entity(entity).despawn();
        count += 1;
    }
    commands.remove_resource::<BodyStates>();
    info!("Cleared scene ({count} entities)");
}

/// Restore per-body state and respawn the scene through the same systems
/// that built it at startup. Positions pick up from the retained clock.
fn rebuild_scene(
    mut messages: MessageReader<RebuildScene>,
    states: Option<Res<BodyStates>>,
    catalog: Res<Catalog>,
    mut commands: Commands,
) {
    if messages.is_empty() {
        return;
    }
    messages.clear();

    if states.is_some() {
        return;
    }
    commands.insert_resource(BodyStates::for_catalog(&catalog));
    commands.run_system_cached(spawn_bodies);
    commands.run_system_cached(spawn_orbit_rings);
    info!("Rebuilt scene");
}
