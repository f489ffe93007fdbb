//! Orbit camera for inspecting the spacecraft and asteroid.
//!
//! Left-drag orbits around the scene origin and the wheel dollies in and out,
//! with damping and distance/polar limits applied every frame.

/// Orbit camera resource, spawn helper and controller system.
pub mod orbit_camera;
