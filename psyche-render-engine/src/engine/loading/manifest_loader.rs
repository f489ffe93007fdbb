use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MISSION_MANIFEST_PATH;

use crate::engine::assets::mission_manifest::MissionManifest;
use crate::engine::loading::model_loader::ReplaceModelEvent;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::named_object::SceneObjectKey;
use crate::engine::scene::psyche::initial_psyche_placement;
use crate::view::view_state::PsycheVariant;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<MissionManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading mission manifest from: {}", MISSION_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MISSION_MANIFEST_PATH));
}

/// Once the manifest is available, publish it and request every startup model.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<MissionManifest>>,
    asset_server: Res<AssetServer>,
    mut replace_events: EventWriter<ReplaceModelEvent>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded || loading_progress.manifest_failed {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        error!("Mission manifest failed to load: {}", err);
        loading_progress.manifest_failed = true;
        return;
    }

    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    if let Err(err) = manifest.validate() {
        error!("Mission manifest rejected: {}", err);
        loading_progress.manifest_failed = true;
        return;
    }

    let requests = startup_requests(manifest);
    loading_progress.models_requested = requests.len();
    replace_events.write_batch(requests);

    commands.insert_resource(manifest.clone());
    loading_progress.manifest_loaded = true;
    info!(
        "✓ Mission manifest loaded, {} models requested",
        loading_progress.models_requested
    );
}

/// Fixed spacecraft parts followed by the base asteroid at its initial placement.
pub fn startup_requests(manifest: &MissionManifest) -> Vec<ReplaceModelEvent> {
    let mut requests: Vec<ReplaceModelEvent> = manifest
        .fixed_objects
        .iter()
        .map(|fixed| ReplaceModelEvent {
            key: fixed.key,
            path: fixed.path.clone(),
            placement: fixed.placement(),
        })
        .collect();

    requests.push(ReplaceModelEvent {
        key: SceneObjectKey::Psyche,
        path: manifest.psyche.path_for(PsycheVariant::Base).to_string(),
        placement: initial_psyche_placement(),
    });

    requests
}
