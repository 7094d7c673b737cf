use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod catalog;
mod orbital;
mod settings;
mod visualization;

use catalog::{Catalog, SOLAR_SYSTEM};
use orbital::OrbitalPlugin;
use settings::SceneSettings;
use visualization::{ClearScene, RebuildScene, VisualizationPlugin};

// Setup camera and ambient light
pub fn setup(mut commands: Commands) {
    // Keep the night side of each body faintly visible.
    commands.insert_resource(GlobalAmbientLight {
        brightness: 80.0,
        ..default()
    });

    // 100 units out frames the inner system; pan/zoom reaches the rest.
    let initial_distance = 100.0;

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,              // Look at the sun
        radius: Some(initial_distance), // Initial distance from focus point
        yaw: Some(0.0),                 // Initial yaw angle
        pitch: Some(0.0),               // Initial pitch angle
        force_update: true,             // Force immediate positioning
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            // Neptune's orbit sits ~900 units out; the default far plane would clip it.
            near: 1.0,
            far: 4_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, initial_distance).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

// Scene lifecycle bindings: X tears the scene down, B builds it back up.
fn scene_lifecycle_keys(
    input: Res<ButtonInput<KeyCode>>,
    mut clear: MessageWriter<ClearScene>,
    mut rebuild: MessageWriter<RebuildScene>,
) {
    if input.just_pressed(KeyCode::KeyX) {
        clear.write(ClearScene);
    }
    if input.just_pressed(KeyCode::KeyB) {
        rebuild.write(RebuildScene);
    }
}

fn main() -> anyhow::Result<()> {
    // Configuration defects abort here, before any window opens.
    let settings = SceneSettings::load_or_default()?;
    let catalog = Catalog::assemble(SOLAR_SYSTEM)?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(settings);
    app.insert_resource(catalog);

    app.add_plugins(PanOrbitCameraPlugin);

    // Add our custom plugins
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, setup);
    app.add_systems(Update, scene_lifecycle_keys);

    app.run();
    Ok(())
}
