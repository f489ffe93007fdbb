use bevy::math::Vec3;

/// Asteroid position while orbit A (widest) is active.
pub const ORBIT_A_POSITION: Vec3 = Vec3::new(-125.0, -10.0, 0.0);
pub const ORBIT_B_POSITION: Vec3 = Vec3::new(-100.0, -10.0, 0.0);
pub const ORBIT_C_POSITION: Vec3 = Vec3::new(-75.0, -10.0, 0.0);
/// Asteroid position while orbit D (lowest) is active.
pub const ORBIT_D_POSITION: Vec3 = Vec3::new(-50.0, -10.0, 0.0);

/// Asteroid placement before any orbit has been selected.
pub const INITIAL_PSYCHE_POSITION: Vec3 = Vec3::new(-125.0, -25.0, 0.0);

/// Uniform scale applied to every asteroid model variant.
pub const PSYCHE_SCALE: f32 = 25.0;

/// Asteroid spin about Y in radians per second (0.0006 rad per 60 Hz frame).
pub const PSYCHE_SPIN_RATE: f32 = 0.0006 * 60.0;
