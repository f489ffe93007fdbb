use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFICATION_INTERVAL;

use crate::engine::core::app_state::{FpsText, OrbitLabelText};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::view::view_state::{Orbit, Overlay, ViewState};

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    if current_time - *last_send_time >= FPS_NOTIFICATION_INTERVAL {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                rpc_interface.send_notification(
                    "fps_update",
                    serde_json::json!({
                        "fps": value as f32
                    }),
                );
                *last_send_time = current_time;
            }
        }
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

/// Native overlay replacement for the host page's orbit label.
pub fn orbit_label_update_system(
    view_state: Res<ViewState>,
    mut query: Query<&mut Text, With<OrbitLabelText>>,
) {
    if !view_state.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = orbit_label(&view_state);
    }
}

pub fn orbit_label(view_state: &ViewState) -> String {
    let orbit = match view_state.current_orbit() {
        Orbit::Init => return "Select an orbit (1-4)".to_string(),
        orbit => format!("Orbit {}", orbit.as_str()),
    };
    match view_state.overlay() {
        Overlay::Off => orbit,
        Overlay::On(instrument) => format!("{orbit} | {} overlay", instrument.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::view_state::Instrument;

    #[test]
    fn label_follows_orbit_and_overlay() {
        let mut state = ViewState::default();
        assert_eq!(orbit_label(&state), "Select an orbit (1-4)");

        state.select_orbit(Orbit::B);
        assert_eq!(orbit_label(&state), "Orbit B");

        state.toggle_instrument_overlay(Instrument::Spectrometer);
        assert_eq!(orbit_label(&state), "Orbit B | spectrometer overlay");
    }
}
