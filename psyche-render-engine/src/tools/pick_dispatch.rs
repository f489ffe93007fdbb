use bevy::prelude::*;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::scene::named_object::{SceneObjectKey, SceneObjectTag};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::view::view_events::{InputSource, InstrumentToggleEvent};
use crate::view::view_state::Instrument;

/// Upper bound on hierarchy depth walked from a hit mesh to its model root.
const MAX_PICK_DEPTH: usize = 64;

/// What a click on a scene object does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickAction {
    pub label: &'static str,
    pub show_detail_panel: bool,
    /// Overlay to toggle; ownership by the current orbit is checked downstream.
    pub instrument: Option<Instrument>,
}

pub fn pick_action(key: SceneObjectKey) -> PickAction {
    use SceneObjectKey::*;

    let (label, show_detail_panel, instrument) = match key {
        Psyche => ("Psyche", false, None),
        Spacecraft => ("Spacecraft", true, None),
        Imager1 | Imager2 => ("Imager", true, Some(Instrument::Imager)),
        NeutronSpectrometer => ("Neutron spectrometer", true, Some(Instrument::Spectrometer)),
        GammaRaySpectrometer => ("Gamma-ray spectrometer", true, Some(Instrument::Spectrometer)),
        Magnetometer1 | Magnetometer2 => ("Magnetometer", true, Some(Instrument::Magnetometer)),
    };

    PickAction {
        label,
        show_detail_panel,
        instrument,
    }
}

/// Walk from `entity` up the hierarchy to the first tagged model root.
pub fn tagged_ancestor(
    entity: Entity,
    tag_of: impl Fn(Entity) -> Option<SceneObjectKey>,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> Option<SceneObjectKey> {
    let mut current = entity;
    for _ in 0..MAX_PICK_DEPTH {
        if let Some(key) = tag_of(current) {
            return Some(key);
        }
        current = parent_of(current)?;
    }
    None
}

pub fn handle_pointer_picks(
    mut clicks: EventReader<Pointer<Click>>,
    orbit_camera: Option<Res<OrbitCamera>>,
    tags: Query<&SceneObjectTag>,
    parents: Query<&ChildOf>,
    mut toggle_events: EventWriter<InstrumentToggleEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for click in clicks.read() {
        if click.event.button != PointerButton::Primary {
            continue;
        }
        if orbit_camera.as_ref().is_some_and(|camera| camera.is_drag()) {
            continue;
        }

        let Some(key) = tagged_ancestor(
            click.target,
            |entity| tags.get(entity).ok().map(|tag| tag.0),
            |entity| parents.get(entity).ok().map(|child_of| child_of.parent()),
        ) else {
            continue;
        };

        let action = pick_action(key);
        info!("{} clicked", action.label);

        if action.show_detail_panel {
            rpc_interface.send_notification(
                "detail_panel_shown",
                serde_json::json!({
                    "object": key.id(),
                    "instrument": action.instrument.map(|instrument| instrument.as_str()),
                }),
            );
        }

        if let Some(instrument) = action.instrument {
            toggle_events.write(InstrumentToggleEvent {
                instrument,
                source: InputSource::Pointer,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn every_key_has_one_action() {
        for key in SceneObjectKey::ALL {
            let action = pick_action(key);
            assert!(!action.label.is_empty());
            assert_eq!(action.show_detail_panel, key != SceneObjectKey::Psyche);
        }
    }

    #[test]
    fn instrument_parts_toggle_their_overlay() {
        assert_eq!(
            pick_action(SceneObjectKey::Imager2).instrument,
            Some(Instrument::Imager)
        );
        assert_eq!(
            pick_action(SceneObjectKey::GammaRaySpectrometer).instrument,
            Some(Instrument::Spectrometer)
        );
        assert_eq!(
            pick_action(SceneObjectKey::NeutronSpectrometer).instrument,
            Some(Instrument::Spectrometer)
        );
        assert_eq!(
            pick_action(SceneObjectKey::Magnetometer1).instrument,
            Some(Instrument::Magnetometer)
        );
        assert_eq!(pick_action(SceneObjectKey::Spacecraft).instrument, None);
        assert_eq!(pick_action(SceneObjectKey::Psyche).instrument, None);
    }

    #[test]
    fn hits_resolve_to_nearest_tagged_ancestor() {
        let root = Entity::from_raw(1);
        let node = Entity::from_raw(2);
        let mesh = Entity::from_raw(3);
        let stray = Entity::from_raw(9);

        let tags = HashMap::from([(root, SceneObjectKey::GammaRaySpectrometer)]);
        let parents = HashMap::from([(mesh, node), (node, root)]);
        let tag_of = |entity| tags.get(&entity).copied();
        let parent_of = |entity| parents.get(&entity).copied();

        assert_eq!(
            tagged_ancestor(mesh, tag_of, parent_of),
            Some(SceneObjectKey::GammaRaySpectrometer)
        );
        assert_eq!(
            tagged_ancestor(root, tag_of, parent_of),
            Some(SceneObjectKey::GammaRaySpectrometer)
        );
        assert_eq!(tagged_ancestor(stray, tag_of, parent_of), None);
    }

    #[test]
    fn hierarchy_cycles_terminate() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let parents = HashMap::from([(a, b), (b, a)]);
        assert_eq!(
            tagged_ancestor(a, |_| None, |entity| parents.get(&entity).copied()),
            None
        );
    }
}
