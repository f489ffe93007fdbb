//! Runtime diagnostics and native overlay systems.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates native UI
/// overlays, including the current orbit label.
pub mod fps_tracking;
