//! Input tools that turn user interaction into view requests.
//!
//! Both tools only emit `OrbitSelectionEvent` / `InstrumentToggleEvent`; the
//! view systems decide whether a request is valid for the current orbit.
//!
//! ## Pointer picks
//!
//! Clicking a spacecraft part resolves the hit mesh to its model root via the
//! `SceneObjectTag` on the nearest ancestor, then:
//! - logs the part
//! - notifies the host page to show the detail panel (not for the asteroid)
//! - toggles the part's instrument overlay if it has one
//!
//! A press that travelled more than a few pixels orbited the camera and is
//! not treated as a pick.
//!
//! ## Keyboard (native only)
//!
//! | Key | Action |
//! |-----|--------|
//! | `1`..`4` | Orbit A..D |
//! | `I` | Imager overlay |
//! | `G` | Gamma-ray / neutron spectrometer overlay |
//! | `M` | Magnetometer overlay |

/// Native stand-ins for the host page's orbit and instrument buttons.
pub mod keyboard_shortcuts;

/// Mesh-pick to scene object resolution and per-object actions.
pub mod pick_dispatch;
