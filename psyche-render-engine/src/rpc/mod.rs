//! JSON-RPC 2.0 communication layer for the host page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page that
//! embeds it (orbit buttons, instrument buttons, labels) via postMessage,
//! supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host page              <──postMessage──>  Bevy (canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Request Handling
//!
//! `process_incoming_messages` drains the postMessage queue into events,
//! `handle_rpc_messages` answers each request that carries an `id`, and
//! `send_outgoing_messages` posts queued notifications then responses to the
//! parent window. View requests only write `OrbitSelectionEvent` or
//! `InstrumentToggleEvent`; the view systems apply them later in the frame,
//! so the response reports what was requested rather than the new state.
//! Orbit and instrument requests made before the manifest has settled are
//! refused with `-32603`.
//!
//! Only string payloads are read, so the host page serialises its requests:
//!
//! ```typescript
//! window.postMessage(
//!   JSON.stringify({ jsonrpc: "2.0", method: "select_orbit", params: { orbit: "B" }, id: 1 }),
//!   "*",
//! );
//! window.addEventListener("message", (event) => {
//!   const message = JSON.parse(event.data);
//!   if (message.method === "ui_visibility_changed") applyVisibility(message.params);
//! });
//! ```
//!
//! ## Error Codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Scene still loading
//!
//! ## Existing Methods
//!
//! ### View Control
//! - `select_orbit`: Switch to orbit `"A"`..`"D"` (also accepts `"orbitA"` style ids)
//! - `toggle_instrument`: Toggle `"imager"`, `"GRNS"` or `"magnetometer"` overlay
//! - `get_view_state`: Current orbit, overlay, UI visibility and scene object status
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! - `viewer_ready`: Manifest settled, startup models requested
//! - `orbit_changed`, `ui_visibility_changed`: After every orbit change
//! - `overlay_changed`: Instrument overlay switched on or off
//! - `detail_panel_shown`: A spacecraft part was picked
//! - `model_load_failed`: A model could not be loaded
//! - `fps_update`: Smoothed frame rate every 0.5 s

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
