use bevy::prelude::*;
use constants::orbit::{INITIAL_PSYCHE_POSITION, PSYCHE_SCALE, PSYCHE_SPIN_RATE};

use super::lifecycle::{Placement, SceneObjectRegistry};
use super::named_object::SceneObjectKey;
use crate::view::view_state::{Orbit, ViewState};

/// Slowly rotate the asteroid once an orbit has been chosen.
pub fn spin_psyche(
    time: Res<Time>,
    view_state: Res<ViewState>,
    registry: Res<SceneObjectRegistry>,
    mut transforms: Query<&mut Transform>,
) {
    if view_state.current_orbit() == Orbit::Init {
        return;
    }
    let Some(entity) = registry.live(SceneObjectKey::Psyche) else {
        return;
    };
    if let Ok(mut transform) = transforms.get_mut(entity) {
        transform.rotate_y(PSYCHE_SPIN_RATE * time.delta_secs());
    }
}

/// Placement the next asteroid variant should inherit.
///
/// Rotation and scale come from the live model, then an in-flight replacement,
/// then the startup placement. Once an orbit is chosen the translation is
/// always that orbit's position.
pub fn psyche_placement(
    registry: &SceneObjectRegistry,
    live: Option<&Transform>,
    orbit: Orbit,
) -> Placement {
    let mut placement = live
        .map(Placement::from_transform)
        .or_else(|| registry.pending(SceneObjectKey::Psyche))
        .unwrap_or_else(initial_psyche_placement);
    pin_to_orbit(&mut placement, orbit);
    placement
}

/// Move `placement` onto the asteroid position of `orbit`. `Init` leaves it untouched.
pub fn pin_to_orbit(placement: &mut Placement, orbit: Orbit) {
    if let Some(position) = orbit.position() {
        placement.translation = position;
    }
}

pub fn initial_psyche_placement() -> Placement {
    Placement::new(
        INITIAL_PSYCHE_POSITION,
        Quat::IDENTITY,
        Vec3::splat(PSYCHE_SCALE),
    )
}
