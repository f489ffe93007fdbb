//! Scene contents and the named-object lifecycle.
//!
//! Owns the typed registry of placed models plus the ambient scene: lights,
//! fog, starfield, spacecraft tracers and the asteroid spin.

/// Lights, fog and colour helpers for the space backdrop.
pub mod ambience;

/// Generation-checked registry of named scene objects.
///
/// Guarantees at most one live entity per key and last-request-wins replacement.
pub mod lifecycle;

/// Typed scene keys and the tag component placed on model roots.
pub mod named_object;

/// Asteroid spin and placement helpers.
pub mod psyche;

/// Randomised point starfield.
pub mod starfield;

/// Particle trails behind the spacecraft.
pub mod tracers;
