/// Number of independent tracer trails behind the spacecraft.
pub const TRACER_SYSTEM_COUNT: usize = 2;
pub const PARTICLES_PER_SYSTEM: usize = 32;

/// Frame rate the per-step tracer constants were tuned at.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Base drift along -Z per reference frame; a random share of `TRACER_Z_JITTER` is added.
pub const TRACER_Z_DRIFT: f32 = 0.0075;
pub const TRACER_Z_JITTER: f32 = 0.005;
pub const TRACER_X_DRIFT: f32 = 0.0075;

/// Trail offset along Z at which a particle wraps back to its origin.
pub const TRACER_RESET_Z: f32 = -4.0;
pub const TRACER_RESET_X: f32 = 0.0075;

pub const TRACER_INITIAL_SIZE: f32 = 1.5;
pub const TRACER_RESET_SIZE: f32 = 2.0;
pub const TRACER_MAX_SIZE: f32 = 40.0;
pub const TRACER_SIZE_DECAY: f32 = 0.005;

/// World radius of a particle per unit of tracer size.
pub const TRACER_RADIUS_PER_SIZE: f32 = 0.04;
pub const TRACER_COLOUR: u32 = 0xf50c0c;
