//! Orbit ring rendering: closed line loops traced at each orbit radius.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::catalog::Catalog;
use crate::orbital::BodyStates;
use crate::settings::SceneSettings;
use crate::visualization::bodies::SceneEntity;

/// Ring that follows a moving primary (catalog index of the primary).
#[derive(Component, Debug, Clone, Copy)]
pub struct RingAroundBody(pub usize);

/// Build a closed circle of line segments in the XY plane.
///
/// The first vertex is repeated at the end to close the loop; spawners
/// rotate the ring into the orbital plane.
pub fn orbit_ring_mesh(radius: f32, segments: usize) -> Mesh {
    let mut positions = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let angle = TAU * i as f32 / segments as f32;
        positions.push([radius * angle.cos(), radius * angle.sin(), 0.0]);
    }
    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

/// Spawn one orbit ring per orbiting body.
///
/// The central body has no orbit and gets none. Rings around the central
/// body stay put; a satellite's ring is tagged to follow its primary.
pub fn spawn_orbit_rings(
    mut commands: Commands,
    catalog: Res<Catalog>,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.38, 0.45),
        unlit: true,
        ..default()
    });

    for (index, spec) in catalog.specs().enumerate() {
        let Some(parent) = catalog.parent_of(index) else {
            continue;
        };
        let radius = (spec.semi_major_axis_au * settings.au_scale) as f32;
        let mesh = meshes.add(orbit_ring_mesh(radius, settings.ring_segments));
        // Rings are built in XY and tipped down into the XZ orbital plane.
        let mut entity = commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material.clone()),
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            SceneEntity,
            Name::new(format!("{} orbit", spec.name)),
        ));
        if !catalog.is_central(parent) {
            entity.insert(RingAroundBody(parent));
        }
    }
}

/// Keep satellite rings centered on their primary.
///
/// Only the translation follows; the orientation fixed at spawn is never
/// touched.
pub fn recenter_satellite_rings(
    states: Res<BodyStates>,
    mut rings: Query<(&RingAroundBody, &mut Transform)>,
) {
    for (ring, mut transform) in &mut rings {
        let Some(primary) = states.get(ring.0) else {
            continue;
        };
        transform.translation = primary.position.as_vec3();
    }
}
