//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, launch options,
//! state transitions, and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with picking, glTF and manifest loading, the host page
/// bridge and platform-specific configurations.
pub mod app_setup;

/// Application state machine and loading-to-running transition.
pub mod app_state;

/// Camera distance and immersive-mode options read from the launch query.
pub mod launch_config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
