use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::view::ui_visibility::ui_visibility;
use crate::view::view_state::ViewState;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct OrbitLabelText;

// Leave loading once the manifest is settled, even if it failed, so the
// view controls stay responsive.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded || loading_progress.manifest_failed {
        info!("→ Mission manifest settled, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Tell the host page which elements belong to the start view.
pub fn announce_initial_view(
    view_state: Res<ViewState>,
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    rpc_interface.send_notification(
        "viewer_ready",
        serde_json::json!({
            "models_requested": loading_progress.models_requested,
            "manifest_failed": loading_progress.manifest_failed,
            "view": view_state.to_json(),
        }),
    );
    rpc_interface.send_notification(
        "ui_visibility_changed",
        ui_visibility(view_state.current_orbit()).to_json(),
    );
}
