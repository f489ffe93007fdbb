use bevy::prelude::*;

use crate::view::view_events::{InputSource, InstrumentToggleEvent, OrbitSelectionEvent};
use crate::view::view_state::{Instrument, Orbit};

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
const ORBIT_KEYS: [(KeyCode, Orbit); 4] = [
    (KeyCode::Digit1, Orbit::A),
    (KeyCode::Digit2, Orbit::B),
    (KeyCode::Digit3, Orbit::C),
    (KeyCode::Digit4, Orbit::D),
];

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
const INSTRUMENT_KEYS: [(KeyCode, Instrument); 3] = [
    (KeyCode::KeyI, Instrument::Imager),
    (KeyCode::KeyG, Instrument::Spectrometer),
    (KeyCode::KeyM, Instrument::Magnetometer),
];

/// Stand-ins for the host page buttons (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_view_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut orbit_events: EventWriter<OrbitSelectionEvent>,
    mut instrument_events: EventWriter<InstrumentToggleEvent>,
) {
    for (key, orbit) in ORBIT_KEYS {
        if keyboard.just_pressed(key) {
            orbit_events.write(OrbitSelectionEvent {
                orbit,
                source: InputSource::Keyboard,
            });
        }
    }

    for (key, instrument) in INSTRUMENT_KEYS {
        if keyboard.just_pressed(key) {
            instrument_events.write(InstrumentToggleEvent {
                instrument,
                source: InputSource::Keyboard,
            });
        }
    }
}

/// Placeholder system for WASM builds where the host page buttons drive the view.
#[cfg(target_arch = "wasm32")]
pub fn handle_view_keyboard_shortcuts() {}
