//! Shared tuning data for the Psyche mission viewer.

pub mod orbit;
pub mod path;
pub mod render_settings;
pub mod starfield;
pub mod tracer;
