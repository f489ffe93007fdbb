//! Orbit and instrument-overlay view model.
//!
//! `ViewState` is the single source of truth for which orbit is active and
//! whether an instrument overlay is shown. Requests arrive as events from the
//! host page, keyboard shortcuts or pointer picks and are applied in order
//! once per frame.
//!
//! ```text
//! RPC / keyboard / pick
//!   └─> OrbitSelectionEvent | InstrumentToggleEvent
//!       └─> handle_*_events()
//!           ├─> ViewState transition (no-op if invalid)
//!           ├─> move asteroid or ReplaceModelEvent
//!           └─> notify host page
//! ```

use bevy::prelude::*;

/// Host page element visibility per orbit.
pub mod ui_visibility;

/// Event types and the systems that apply them to the scene.
pub mod view_events;

/// Orbit/overlay state machine.
pub mod view_state;

use view_events::{InstrumentToggleEvent, OrbitSelectionEvent};
use view_state::ViewState;

/// Registers the view state resource and request events.
pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewState>()
            .add_event::<OrbitSelectionEvent>()
            .add_event::<InstrumentToggleEvent>();
    }
}
