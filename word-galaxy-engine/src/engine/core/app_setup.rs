use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE};
use constants::render_settings::{BACKGROUND_COLOUR, FOG_DENSITY};

// Crate engine modules
use crate::engine::camera::orbit_camera::{
    GalaxyCamera, OrbitCamera, apply_orbit_camera, orbit_camera_controller,
};
use crate::engine::camera::reset_animation::{
    CameraAnimator, CameraResetCompleted, advance_camera_reset, camera_resetting,
};
use crate::engine::core::app_state::{
    AppState, FpsText, GalaxyData, GalaxyFilters, LabelStatsText, LabelSyncStats,
};
use crate::engine::core::frame::{FrameSchedulerPlugin, GalaxyFrameSet};
use crate::engine::core::settings::GalaxySettings;
use crate::engine::core::window_config::{check_surface, create_window_config};
use crate::engine::labels::projection::project_labels;
use crate::engine::labels::shading::shade_labels;
use crate::engine::labels::sync::{LabelSyncPlugin, sync_labels};
use crate::engine::labels::{LabelStyle, fallback_on_missing_font, load_label_font};
use crate::engine::loading::snapshot_loader::{
    GalaxySnapshot, SnapshotLoader, poll_snapshot_loading, start_snapshot_loading,
};
use crate::engine::scene::reference_sphere::create_reference_sphere;
use crate::engine::scene::starfield::create_star_field;
use crate::engine::systems::fps_tracking::{
    fps_notification_system, fps_text_update_system, label_stats_text_system,
};
use crate::error::GalaxyResult;
use crate::galaxy::clusters::hex_colour;
// Crate tools modules
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::selection::{
    LabelPointerGuard, SelectionDispatcher, WordSelected, dispatch_label_activation,
};
use crate::tools::shortcuts::handle_galaxy_shortcuts;

pub fn create_app() -> GalaxyResult<App> {
    create_app_with(GalaxySettings::default())
}

/// Build the full application, failing if there is no surface to draw into.
pub fn create_app_with(settings: GalaxySettings) -> GalaxyResult<App> {
    check_surface(&settings)?;

    let mut app = App::new();

    app.add_plugins(create_default_plugins(&settings))
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GalaxySnapshot as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalaxySnapshot>::new(&["galaxy.json"]))
        .add_plugins(FrameSchedulerPlugin)
        .add_plugins(LabelSyncPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(hex_colour(BACKGROUND_COLOUR)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
        app.add_plugins(WireframePlugin::default())
            .insert_resource(WireframeConfig {
                global: false,
                default_color: Color::WHITE,
            });
    }

    insert_galaxy_resources(&mut app, settings);
    app.init_resource::<SnapshotLoader>();

    app.add_systems(
        Startup,
        (setup, load_label_font, start_snapshot_loading).chain(),
    )
    .add_systems(
        Update,
        poll_snapshot_loading.run_if(in_state(AppState::Loading)),
    );

    app.add_systems(
        Update,
        (
            handle_galaxy_shortcuts.in_set(GalaxyFrameSet::Input),
            fallback_on_missing_font
                .before(sync_labels)
                .in_set(GalaxyFrameSet::Sync)
                .run_if(in_state(AppState::Running)),
            advance_camera_reset
                .run_if(camera_resetting)
                .in_set(GalaxyFrameSet::Animate),
            orbit_camera_controller.in_set(GalaxyFrameSet::Controls),
            apply_orbit_camera.in_set(GalaxyFrameSet::Camera),
            shade_labels.in_set(GalaxyFrameSet::Shade),
            project_labels.in_set(GalaxyFrameSet::Project),
            fps_notification_system,
        ),
    );

    // Stats overlay only exists in native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (fps_text_update_system, label_stats_text_system));
    }

    Ok(app)
}

/// Galaxy state shared by every build flavour, including headless tests.
pub fn insert_galaxy_resources(app: &mut App, settings: GalaxySettings) {
    app.insert_resource(OrbitCamera::new(settings.home, settings.orbit))
        .insert_resource(CameraAnimator::new(settings.home, settings.reset_step))
        .init_resource::<GalaxyData>()
        .init_resource::<GalaxyFilters>()
        .init_resource::<LabelSyncStats>()
        .init_resource::<LabelStyle>()
        .init_resource::<SelectionDispatcher>()
        .init_resource::<LabelPointerGuard>()
        .add_event::<WordSelected>()
        .add_event::<CameraResetCompleted>()
        .add_observer(dispatch_label_activation)
        .insert_resource(settings);
}

fn spawn_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    let background = hex_colour(BACKGROUND_COLOUR);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
        DistanceFog {
            color: background,
            falloff: FogFalloff::ExponentialSquared {
                density: FOG_DENSITY,
            },
            ..default()
        },
        GalaxyCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GalaxySettings>,
    orbit: Res<OrbitCamera>,
) {
    info!("=== WORD GALAXY ===");

    spawn_camera(&mut commands, &orbit);
    create_star_field(&mut commands, &mut meshes, &mut materials);
    create_reference_sphere(
        &mut commands,
        &mut meshes,
        &mut materials,
        settings.sphere_radius,
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            // Must not swallow clicks meant for labels.
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                Pickable::IGNORE,
                FpsText,
            ));
            parent.spawn((
                Text::new("Words: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                Pickable::IGNORE,
                LabelStatsText,
            ));
        });
}

fn create_default_plugins(settings: &GalaxySettings) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config(settings)),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
