use bevy::prelude::*;

use super::ui_visibility::ui_visibility;
use super::view_state::{Instrument, Orbit, PsycheVariant, ViewState};
use crate::engine::assets::mission_manifest::MissionManifest;
use crate::engine::loading::model_loader::ReplaceModelEvent;
use crate::engine::scene::lifecycle::{Placement, SceneObjectRegistry};
use crate::engine::scene::named_object::SceneObjectKey;
use crate::engine::scene::psyche::psyche_placement;
use crate::rpc::web_rpc::WebRpcInterface;

/// Where a view request came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Rpc,
    Keyboard,
    Pointer,
}

/// Request to switch to an orbit (host button, RPC or shortcut).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct OrbitSelectionEvent {
    pub orbit: Orbit,
    pub source: InputSource,
}

/// Request to toggle an instrument overlay on the asteroid.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InstrumentToggleEvent {
    pub instrument: Instrument,
    pub source: InputSource,
}

/// Apply orbit changes: move the asteroid, or reload the base model if an
/// overlay had to be cleared, then publish the new UI visibility.
pub fn handle_orbit_selection_events(
    mut events: EventReader<OrbitSelectionEvent>,
    mut view_state: ResMut<ViewState>,
    mut registry: ResMut<SceneObjectRegistry>,
    manifest: Option<Res<MissionManifest>>,
    mut transforms: Query<&mut Transform>,
    mut replace_events: EventWriter<ReplaceModelEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let Some(transition) = view_state.select_orbit(event.orbit) else {
            debug!(
                "Orbit {} ignored via {:?}, already active or not selectable",
                event.orbit.as_str(),
                event.source
            );
            continue;
        };
        let Some(target) = transition.current.position() else {
            continue;
        };
        let live = registry.live(SceneObjectKey::Psyche);

        if transition.overlay_cleared {
            let placement = psyche_placement(
                &registry,
                live.and_then(|entity| transforms.get(entity).ok()),
                transition.current,
            );
            request_psyche(
                manifest.as_deref(),
                view_state.active_variant(),
                placement,
                &mut replace_events,
            );
            rpc_interface.send_notification(
                "overlay_changed",
                serde_json::json!({ "instrument": null, "active": false }),
            );
        } else if let Some(mut transform) = live.and_then(|entity| transforms.get_mut(entity).ok())
        {
            transform.translation = target;
        } else if !registry.set_pending_translation(SceneObjectKey::Psyche, target) {
            debug!("No asteroid to move for orbit {}", transition.current.as_str());
        }

        rpc_interface.send_notification(
            "orbit_changed",
            serde_json::json!({
                "orbit": transition.current.as_str(),
                "previous_orbit": transition.previous.as_str(),
            }),
        );
        rpc_interface.send_notification(
            "ui_visibility_changed",
            ui_visibility(transition.current).to_json(),
        );
    }
}

/// Swap the asteroid between its base and overlay variants, keeping its placement.
pub fn handle_instrument_toggle_events(
    mut events: EventReader<InstrumentToggleEvent>,
    mut view_state: ResMut<ViewState>,
    registry: Res<SceneObjectRegistry>,
    manifest: Option<Res<MissionManifest>>,
    transforms: Query<&Transform>,
    mut replace_events: EventWriter<ReplaceModelEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let Some(variant) = view_state.toggle_instrument_overlay(event.instrument) else {
            debug!(
                "{} toggle ignored via {:?}, it belongs to orbit {} not {}",
                event.instrument.as_str(),
                event.source,
                event.instrument.owning_orbit().as_str(),
                view_state.current_orbit().as_str()
            );
            continue;
        };

        let live = registry
            .live(SceneObjectKey::Psyche)
            .and_then(|entity| transforms.get(entity).ok());
        let placement = psyche_placement(&registry, live, view_state.current_orbit());
        request_psyche(manifest.as_deref(), variant, placement, &mut replace_events);

        info!(
            "{} overlay {} via {:?}",
            event.instrument.as_str(),
            if variant == PsycheVariant::Base { "off" } else { "on" },
            event.source
        );
        rpc_interface.send_notification(
            "overlay_changed",
            serde_json::json!({
                "instrument": event.instrument.as_str(),
                "active": variant != PsycheVariant::Base,
            }),
        );
    }
}

fn request_psyche(
    manifest: Option<&MissionManifest>,
    variant: PsycheVariant,
    placement: Placement,
    replace_events: &mut EventWriter<ReplaceModelEvent>,
) {
    let Some(manifest) = manifest else {
        warn!("Mission manifest unavailable, cannot load asteroid {:?}", variant);
        return;
    };
    replace_events.write(ReplaceModelEvent {
        key: SceneObjectKey::Psyche,
        path: manifest.psyche.path_for(variant).to_string(),
        placement,
    });
}
