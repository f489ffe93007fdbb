use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::mission_manifest::MissionManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller, spawn_orbit_camera};
use crate::engine::core::app_state::{
    AppState, FpsText, OrbitLabelText, announce_initial_view, transition_to_running,
};
use crate::engine::core::launch_config::{LaunchConfig, load_launch_config};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{
    PendingModels, ReplaceModelEvent, dispatch_model_replacements, poll_pending_models,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::ambience::spawn_lighting;
use crate::engine::scene::lifecycle::SceneObjectRegistry;
use crate::engine::scene::psyche::spin_psyche;
use crate::engine::scene::starfield::spawn_starfield;
use crate::engine::scene::tracers::{spawn_tracers, update_tracers};
use crate::engine::systems::fps_tracking::fps_notification_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, orbit_label_update_system};
// Host page bridge, view model and input tools
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::keyboard_shortcuts::handle_view_keyboard_shortcuts;
use crate::tools::pick_dispatch::handle_pointer_picks;
use crate::view::ViewPlugin;
use crate::view::view_events::{handle_instrument_toggle_events, handle_orbit_selection_events};
use crate::xr::session_check::XrSessionPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers MissionManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MissionManifest>::new(&["json"]))
        .add_plugins(MeshPickingPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(ViewPlugin)
        .add_plugins(XrSessionPlugin)
        .insert_resource(ClearColor(Color::BLACK));

    // Launch options are read once, before any system runs.
    app.insert_resource(load_launch_config());

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<SceneObjectRegistry>()
        .init_resource::<PendingModels>()
        .init_resource::<OrbitCamera>()
        .add_event::<ReplaceModelEvent>();

    // State-based system scheduling
    app.add_systems(
        Startup,
        (setup, start_loading, spawn_starfield, spawn_tracers),
    )
    .add_systems(
        Update,
        (load_manifest_system, transition_to_running)
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(OnEnter(AppState::Running), announce_initial_view);

    // Input becomes view requests, view requests become model replacements,
    // replacements are dispatched and resolved in the same frame.
    let view_systems = (
        handle_view_keyboard_shortcuts, // Native shortcuts or no-op for WASM
        handle_pointer_picks,
        handle_orbit_selection_events,
        handle_instrument_toggle_events,
    )
        .chain()
        .run_if(in_state(AppState::Running));

    app.add_systems(
        Update,
        (
            camera_controller,
            view_systems,
            dispatch_model_replacements,
            poll_pending_models,
        )
            .chain(),
    );

    app.add_systems(Update, (spin_psyche, update_tracers, fps_notification_system));

    // Text overlays only exist in native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (fps_text_update_system, orbit_label_update_system));
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, launch_config: Res<LaunchConfig>) {
    spawn_lighting(&mut commands);
    spawn_orbit_camera(&mut commands, &launch_config);

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
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Select an orbit (1-4)"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                OrbitLabelText,
            ));
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
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
