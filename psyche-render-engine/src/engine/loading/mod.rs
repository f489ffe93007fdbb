//! Asset loading for the mission manifest and glTF models.
//!
//! The manifest is loaded once at startup; every model placement, including
//! the runtime asteroid swaps, goes through the generation-checked
//! replacement path in `model_loader`.

/// Mission manifest loading and initial model requests.
pub mod manifest_loader;

/// Asynchronous glTF replacement with stale-result discarding.
///
/// Pairs `ReplaceModelEvent` requests with `SceneObjectRegistry` generations.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
