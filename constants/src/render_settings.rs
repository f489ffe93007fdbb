use bevy::math::Vec3;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 5000.0;

/// Camera distance factor used when the launch query carries no usable integer.
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 4.0;
pub const ORBIT_MAX_DISTANCE: f32 = 100.0;
pub const ORBIT_MIN_POLAR_ANGLE: f32 = 0.01;
pub const ORBIT_MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;
/// Fraction of the remaining motion applied per 60 Hz frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;
/// Pointer travel in pixels above which a press-release is a drag, not a pick.
pub const CLICK_DRAG_TOLERANCE: f32 = 4.0;

// Lighting and atmosphere, as 0xRRGGBB
pub const AMBIENT_LIGHT_COLOUR: u32 = 0x888888;
pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 400.0;
pub const DIRECTIONAL_LIGHT_COLOUR: u32 = 0xcccccc;
pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 8_000.0;
pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(0.5, 5.0, 5.0);
pub const FOG_COLOUR: u32 = 0x141414;
pub const FOG_DENSITY: f32 = 0.0001;

/// Seconds between FPS notifications sent to the host page.
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;
