//! Immersive (WebXR) capability check for headset launches.
//!
//! Runs only when the launch query asks for it. Unsupported browsers get a
//! platform-specific hint and are sent back to the previous page.

/// Platform detection, user-facing messages and the async capability probe.
pub mod session_check;
