use crate::engine::scene::lifecycle::{LoadOutcome, Placement, Resolution, SceneObjectRegistry};
use crate::engine::scene::named_object::{SceneObjectKey, SceneObjectTag};
use crate::engine::scene::psyche::pin_to_orbit;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::view::view_state::ViewState;
use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use thiserror::Error;

/// Request to (re)place the model for `key`. The previous instance is removed immediately.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ReplaceModelEvent {
    pub key: SceneObjectKey,
    pub path: String,
    pub placement: Placement,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadError {
    #[error("failed to load {key} from {path}: {reason}")]
    Failed {
        key: SceneObjectKey,
        path: String,
        reason: String,
    },
    #[error("{path} contains no scene for {key}")]
    NoScene { key: SceneObjectKey, path: String },
}

struct PendingModel {
    key: SceneObjectKey,
    generation: u64,
    path: String,
    handle: Handle<Gltf>,
}

/// glTF loads issued but not yet resolved.
#[derive(Resource, Default)]
pub struct PendingModels {
    loads: Vec<PendingModel>,
}

impl PendingModels {
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}

/// Detach the current model for each request and start loading its replacement.
///
/// The asteroid is pinned to the orbit active at dispatch, so a request built
/// earlier in the same frame cannot land at a position the view has left.
pub fn dispatch_model_replacements(
    mut events: EventReader<ReplaceModelEvent>,
    mut registry: ResMut<SceneObjectRegistry>,
    mut pending: ResMut<PendingModels>,
    view_state: Res<ViewState>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    for event in events.read() {
        let mut placement = event.placement;
        if event.key == SceneObjectKey::Psyche {
            pin_to_orbit(&mut placement, view_state.current_orbit());
        }

        let ticket = registry.begin_replace(event.key, placement);
        if let Some(entity) = ticket.detached {
            commands.entity(entity).despawn();
        }

        info!(
            "Loading {} from {} (request {})",
            event.key, event.path, ticket.generation
        );

        pending.loads.push(PendingModel {
            key: event.key,
            generation: ticket.generation,
            path: event.path.clone(),
            handle: asset_server.load(event.path.clone()),
        });
    }
}

/// Resolve finished loads: spawn current ones, drop stale ones, report failures.
pub fn poll_pending_models(
    mut pending: ResMut<PendingModels>,
    mut registry: ResMut<SceneObjectRegistry>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands: Commands,
) {
    if pending.is_empty() {
        return;
    }

    for load in std::mem::take(&mut pending.loads) {
        let result = match asset_server.get_load_state(&load.handle) {
            Some(LoadState::Loaded) => gltf_scene(&gltfs, &load.handle).ok_or_else(|| {
                ModelLoadError::NoScene {
                    key: load.key,
                    path: load.path.clone(),
                }
            }),
            Some(LoadState::Failed(err)) => Err(ModelLoadError::Failed {
                key: load.key,
                path: load.path.clone(),
                reason: err.to_string(),
            }),
            _ => {
                pending.loads.push(load);
                continue;
            }
        };

        settle_load(
            &load,
            result,
            &mut registry,
            &mut rpc_interface,
            &mut commands,
        );
    }
}

fn settle_load(
    load: &PendingModel,
    result: Result<Handle<Scene>, ModelLoadError>,
    registry: &mut SceneObjectRegistry,
    rpc_interface: &mut WebRpcInterface,
    commands: &mut Commands,
) {
    match result {
        Ok(scene) => match registry.resolve(load.key, load.generation, LoadOutcome::Loaded) {
            Resolution::Insert(placement) => {
                let entity = commands
                    .spawn((
                        SceneRoot(scene),
                        placement.to_transform(),
                        SceneObjectTag(load.key),
                        Name::new(load.key.name()),
                    ))
                    .id();
                if let Some(displaced) = registry.insert(load.key, entity) {
                    commands.entity(displaced).despawn();
                }
                info!("✓ {} placed from {}", load.key, load.path);
            }
            Resolution::Discard | Resolution::Abandoned => {
                debug!(
                    "Discarding superseded {} load (request {})",
                    load.key, load.generation
                );
            }
        },
        Err(error) => match registry.resolve(load.key, load.generation, LoadOutcome::Failed) {
            Resolution::Abandoned => {
                error!("{}", error);
                rpc_interface.send_notification(
                    "model_load_failed",
                    serde_json::json!({
                        "name": load.key.name(),
                        "path": load.path,
                        "error": error.to_string(),
                    }),
                );
            }
            _ => debug!("Ignoring failure of superseded request: {}", error),
        },
    }
}

fn gltf_scene(gltfs: &Assets<Gltf>, handle: &Handle<Gltf>) -> Option<Handle<Scene>> {
    let gltf = gltfs.get(handle)?;
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::mission_manifest::MissionManifest;
    use crate::view::view_events::{
        InputSource, InstrumentToggleEvent, OrbitSelectionEvent, handle_instrument_toggle_events,
        handle_orbit_selection_events,
    };
    use crate::view::view_state::{Instrument, Orbit};
    use bevy::ecs::system::RunSystemOnce;

    const BASE_PATH: &str = "models/psyche/psyche_base.glb";

    fn manifest() -> MissionManifest {
        serde_json::from_str(include_str!("../../../assets/mission_manifest.json"))
            .expect("shipped manifest parses")
    }

    fn loader_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Gltf>()
            .add_event::<ReplaceModelEvent>()
            .add_event::<OrbitSelectionEvent>()
            .add_event::<InstrumentToggleEvent>()
            .init_resource::<SceneObjectRegistry>()
            .init_resource::<PendingModels>()
            .init_resource::<ViewState>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(manifest())
            .add_systems(
                Update,
                (
                    handle_orbit_selection_events,
                    handle_instrument_toggle_events,
                    dispatch_model_replacements,
                )
                    .chain(),
            );
        app
    }

    fn psyche_at(translation: Vec3) -> Placement {
        Placement::new(translation, Quat::from_rotation_y(0.4), Vec3::splat(25.0))
    }

    fn request(app: &mut App, key: SceneObjectKey, path: &str, placement: Placement) {
        app.world_mut().send_event(ReplaceModelEvent {
            key,
            path: path.to_string(),
            placement,
        });
    }

    fn select(app: &mut App, orbit: Orbit) {
        app.world_mut().send_event(OrbitSelectionEvent {
            orbit,
            source: InputSource::Rpc,
        });
    }

    fn toggle(app: &mut App, instrument: Instrument) {
        app.world_mut().send_event(InstrumentToggleEvent {
            instrument,
            source: InputSource::Pointer,
        });
    }

    fn latest_psyche_path(app: &App) -> Option<String> {
        app.world()
            .resource::<PendingModels>()
            .loads
            .iter()
            .rev()
            .find(|load| load.key == SceneObjectKey::Psyche)
            .map(|load| load.path.clone())
    }

    /// Stand in for the glTF finishing: resolve the newest asteroid request and spawn it.
    fn finish_psyche_load(app: &mut App) -> Entity {
        let world = app.world_mut();
        let generation = world
            .resource::<PendingModels>()
            .loads
            .iter()
            .rev()
            .find(|load| load.key == SceneObjectKey::Psyche)
            .map(|load| load.generation)
            .expect("an asteroid load is pending");
        world.resource_mut::<PendingModels>().loads.clear();

        let resolution = world.resource_mut::<SceneObjectRegistry>().resolve(
            SceneObjectKey::Psyche,
            generation,
            LoadOutcome::Loaded,
        );
        let Resolution::Insert(placement) = resolution else {
            panic!("expected the newest load to insert, got {resolution:?}");
        };
        let entity = world.spawn(placement.to_transform()).id();
        world
            .resource_mut::<SceneObjectRegistry>()
            .insert(SceneObjectKey::Psyche, entity);
        entity
    }

    fn pending_translation(app: &App) -> Vec3 {
        app.world()
            .resource::<SceneObjectRegistry>()
            .pending(SceneObjectKey::Psyche)
            .expect("asteroid replacement in flight")
            .translation
    }

    fn settle(app: &mut App, load: PendingModel, result: Result<Handle<Scene>, ModelLoadError>) {
        let mut job = Some((load, result));
        app.world_mut()
            .run_system_once(
                move |mut registry: ResMut<SceneObjectRegistry>,
                      mut rpc_interface: ResMut<WebRpcInterface>,
                      mut commands: Commands| {
                    if let Some((load, result)) = job.take() {
                        settle_load(&load, result, &mut registry, &mut rpc_interface, &mut commands);
                    }
                },
            )
            .expect("settle system runs");
    }

    fn psyche_load(generation: u64) -> PendingModel {
        PendingModel {
            key: SceneObjectKey::Psyche,
            generation,
            path: BASE_PATH.to_string(),
            handle: Handle::default(),
        }
    }

    fn tagged_count(app: &mut App) -> usize {
        let mut tags = app.world_mut().query::<&SceneObjectTag>();
        tags.iter(app.world()).count()
    }

    fn failure_notifications(app: &App) -> Vec<serde_json::Value> {
        app.world()
            .resource::<WebRpcInterface>()
            .queued_notifications()
            .iter()
            .filter(|notification| notification.method == "model_load_failed")
            .map(|notification| notification.params.clone())
            .collect()
    }

    #[test]
    fn load_errors_name_the_object_and_path() {
        let error = ModelLoadError::Failed {
            key: SceneObjectKey::Psyche,
            path: "models/psyche/psyche_imager.glb".into(),
            reason: "404".into(),
        };
        assert_eq!(
            error.to_string(),
            "failed to load psyche from models/psyche/psyche_imager.glb: 404"
        );
    }

    #[test]
    fn dispatch_despawns_the_detached_model() {
        let mut app = loader_app();
        let old = app.world_mut().spawn(Transform::default()).id();
        app.world_mut()
            .resource_mut::<SceneObjectRegistry>()
            .insert(SceneObjectKey::Psyche, old);

        request(&mut app, SceneObjectKey::Psyche, BASE_PATH, psyche_at(Vec3::ZERO));
        app.update();

        assert!(app.world().get_entity(old).is_err());
        let registry = app.world().resource::<SceneObjectRegistry>();
        assert_eq!(registry.live(SceneObjectKey::Psyche), None);
        assert!(registry.is_pending(SceneObjectKey::Psyche));
        assert_eq!(app.world().resource::<PendingModels>().loads.len(), 1);
    }

    #[test]
    fn dispatch_pins_the_asteroid_to_the_active_orbit() {
        let mut app = loader_app();
        app.world_mut()
            .resource_mut::<ViewState>()
            .select_orbit(Orbit::C);

        request(
            &mut app,
            SceneObjectKey::Psyche,
            BASE_PATH,
            psyche_at(Vec3::new(-100.0, -10.0, 0.0)),
        );
        request(
            &mut app,
            SceneObjectKey::Spacecraft,
            "models/spacecraft/spacecraft_with_frame.glb",
            Placement::new(Vec3::new(-4.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.025)),
        );
        app.update();

        assert_eq!(pending_translation(&app), Vec3::new(-75.0, -10.0, 0.0));
        let spacecraft = app
            .world()
            .resource::<SceneObjectRegistry>()
            .pending(SceneObjectKey::Spacecraft)
            .expect("spacecraft requested");
        assert_eq!(spacecraft.translation, Vec3::new(-4.0, 0.0, 0.0));
    }

    #[test]
    fn two_orbit_changes_in_one_frame_follow_the_last() {
        let mut app = loader_app();
        select(&mut app, Orbit::A);
        app.update();
        toggle(&mut app, Instrument::Imager);
        app.update();
        let overlay = finish_psyche_load(&mut app);

        select(&mut app, Orbit::B);
        select(&mut app, Orbit::C);
        app.update();

        assert_eq!(
            app.world().resource::<ViewState>().current_orbit(),
            Orbit::C
        );
        assert!(app.world().get_entity(overlay).is_err());
        assert_eq!(pending_translation(&app), Vec3::new(-75.0, -10.0, 0.0));
        assert_eq!(latest_psyche_path(&app), Some(manifest().psyche.base));
    }

    #[test]
    fn orbit_change_and_toggle_in_one_frame_load_at_new_orbit() {
        let mut app = loader_app();
        select(&mut app, Orbit::C);
        app.update();
        toggle(&mut app, Instrument::Magnetometer);
        app.update();
        finish_psyche_load(&mut app);

        select(&mut app, Orbit::A);
        toggle(&mut app, Instrument::Imager);
        app.update();

        assert_eq!(pending_translation(&app), Vec3::new(-125.0, -10.0, 0.0));
        assert_eq!(latest_psyche_path(&app), Some(manifest().psyche.imager));
    }

    #[test]
    fn failed_current_load_is_reported_and_leaves_key_absent() {
        let mut app = loader_app();
        let ticket = app
            .world_mut()
            .resource_mut::<SceneObjectRegistry>()
            .begin_replace(SceneObjectKey::Psyche, psyche_at(Vec3::ZERO));

        settle(
            &mut app,
            psyche_load(ticket.generation),
            Err(ModelLoadError::Failed {
                key: SceneObjectKey::Psyche,
                path: BASE_PATH.into(),
                reason: "missing".into(),
            }),
        );

        let registry = app.world().resource::<SceneObjectRegistry>();
        assert_eq!(registry.live(SceneObjectKey::Psyche), None);
        assert!(!registry.is_pending(SceneObjectKey::Psyche));

        let failures = failure_notifications(&app);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0]["name"], "psyche");
        assert_eq!(failures[0]["path"], BASE_PATH);
        assert_eq!(tagged_count(&mut app), 0);
    }

    #[test]
    fn stale_completion_spawns_nothing() {
        let mut app = loader_app();
        let (first, second) = {
            let mut registry = app.world_mut().resource_mut::<SceneObjectRegistry>();
            let first = registry.begin_replace(SceneObjectKey::Psyche, psyche_at(Vec3::X));
            let second = registry.begin_replace(SceneObjectKey::Psyche, psyche_at(Vec3::Y));
            (first, second)
        };

        settle(&mut app, psyche_load(first.generation), Ok(Handle::default()));
        assert_eq!(tagged_count(&mut app), 0);
        assert!(
            app.world()
                .resource::<SceneObjectRegistry>()
                .is_pending(SceneObjectKey::Psyche)
        );

        settle(&mut app, psyche_load(second.generation), Ok(Handle::default()));
        assert_eq!(tagged_count(&mut app), 1);
        let live = app
            .world()
            .resource::<SceneObjectRegistry>()
            .live(SceneObjectKey::Psyche)
            .expect("newest load inserted");
        assert_eq!(
            app.world().get::<Transform>(live).map(|t| t.translation),
            Some(Vec3::Y)
        );
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let mut app = loader_app();
        let first = {
            let mut registry = app.world_mut().resource_mut::<SceneObjectRegistry>();
            let first = registry.begin_replace(SceneObjectKey::Psyche, psyche_at(Vec3::X));
            registry.begin_replace(SceneObjectKey::Psyche, psyche_at(Vec3::Y));
            first
        };

        settle(
            &mut app,
            psyche_load(first.generation),
            Err(ModelLoadError::NoScene {
                key: SceneObjectKey::Psyche,
                path: BASE_PATH.into(),
            }),
        );

        assert!(failure_notifications(&app).is_empty());
        assert!(
            app.world()
                .resource::<SceneObjectRegistry>()
                .is_pending(SceneObjectKey::Psyche)
        );
    }
}
