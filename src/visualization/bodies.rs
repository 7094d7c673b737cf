//! Body rendering: one textured sphere per catalog entry, synced to the
//! kinematics state every frame.

use bevy::asset::AssetLoadFailedEvent;
use bevy::prelude::*;
use std::f64::consts::TAU;

use crate::catalog::{BodySpec, Catalog};
use crate::orbital::BodyStates;
use crate::settings::SceneSettings;

/// Marker component for every entity belonging to the assembled scene.
#[derive(Component)]
pub struct SceneEntity;

/// Catalog index of the body an entity renders.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneBody(pub usize);

/// Display radius in scene units.
///
/// Orbiting bodies get the planet boost so they stay visible next to the
/// central body; the central body is already enormous without it.
pub fn display_radius(spec: &BodySpec, settings: &SceneSettings, central: bool) -> f32 {
    let boost = if central { 1.0 } else { settings.planet_scale_boost };
    (spec.radius_earths * settings.base_body_scale * boost) as f32
}

/// Spawn one sphere per catalog body.
///
/// The central body is self-lit and carries the point light illuminating
/// the rest of the scene. Until their texture resolves (or if it fails),
/// bodies show their catalog color.
pub fn spawn_bodies(
    mut commands: Commands,
    catalog: Res<Catalog>,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    for (index, spec) in catalog.specs().enumerate() {
        let central = catalog.is_central(index);
        let radius = display_radius(spec, &settings, central);
        // 48x24 UV sphere is smooth enough at these display radii.
        let mesh = meshes.add(Sphere::new(radius).mesh().uv(48, 24));
        let base_color = Color::srgb(spec.color[0], spec.color[1], spec.color[2]);
        let material = materials.add(if central {
            StandardMaterial {
                base_color,
                base_color_texture: Some(asset_server.load(spec.texture)),
                emissive: base_color.to_linear() * 8.0,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color,
                base_color_texture: Some(asset_server.load(spec.texture)),
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            }
        });

        let mut entity = commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, 0.0, 0.0),
            Visibility::Visible,
            SceneBody(index),
            SceneEntity,
            Name::new(spec.name),
        ));
        if central {
            entity.insert(PointLight {
                color: Color::WHITE,
                // Lumens; tuned so the outermost orbit is still lit.
                intensity: 1.0e10,
                range: 4_000.0,
                radius,
                shadows_enabled: false,
                ..default()
            });
        }
    }
    info!("Spawned {} bodies", catalog.len());
}

/// Copy the kinematics step's output onto the rendered transforms.
pub fn sync_body_transforms(
    states: Res<BodyStates>,
    mut bodies: Query<(&SceneBody, &mut Transform)>,
) {
    for (body, mut transform) in &mut bodies {
        let Some(state) = states.get(body.0) else {
            continue;
        };
        transform.translation = state.position.as_vec3();
        // Wrap before narrowing so long sessions keep spin precision.
        transform.rotation = Quat::from_rotation_y(state.spin_rad.rem_euclid(TAU) as f32);
    }
}

/// Strip failed textures from materials so the affected bodies fall back
/// to their solid catalog color instead of disappearing.
pub fn handle_texture_load_failures(
    mut failures: MessageReader<AssetLoadFailedEvent<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for failure in failures.read() {
        let affected: Vec<AssetId<StandardMaterial>> = materials
            .iter()
            .filter(|(_, material)| {
                material
                    .base_color_texture
                    .as_ref()
                    .is_some_and(|texture| texture.id() == failure.id)
            })
            .map(|(id, _)| id)
            .collect();
        for id in &affected {
            if let Some(material) = materials.get_mut(*id) {
                material.base_color_texture = None;
            }
        }
        warn!(
            "Texture {} failed to load ({} materials fall back to solid color): {}",
            failure.path,
            affected.len(),
            failure.error
        );
    }
}
