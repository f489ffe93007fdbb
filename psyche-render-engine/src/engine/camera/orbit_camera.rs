use crate::engine::core::launch_config::LaunchConfig;
use crate::engine::scene::ambience::scene_fog;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CLICK_DRAG_TOLERANCE, ORBIT_DAMPING_FACTOR,
    ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR_ANGLE, ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR_ANGLE,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

/// Spherical orbit around `target`.
///
/// `polar` is measured from +Y and `azimuth` around Y starting at +Z. Input is
/// accumulated into the delta fields and bled out over several frames.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub polar_delta: f32,
    pub azimuth_delta: f32,
    pub zoom_scale: f32,
    /// Pointer travel in pixels since the left button went down.
    pub drag_distance: f32,
}

impl OrbitCamera {
    pub fn from_position(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (polar, azimuth) = if radius > f32::EPSILON {
            (
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
                offset.x.atan2(offset.z),
            )
        } else {
            (ORBIT_MIN_POLAR_ANGLE, 0.0)
        };

        let mut camera = Self {
            target,
            radius,
            polar,
            azimuth,
            polar_delta: 0.0,
            azimuth_delta: 0.0,
            zoom_scale: 1.0,
            drag_distance: 0.0,
        };
        camera.clamp();
        camera
    }

    /// Queue a rotation from a pointer drag measured in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.azimuth_delta -= drag.x * ORBIT_ROTATE_SPEED;
        self.polar_delta -= drag.y * ORBIT_ROTATE_SPEED;
    }

    /// Queue a dolly. Positive `amount` moves towards the target.
    pub fn zoom(&mut self, amount: f32) {
        self.zoom_scale *= (1.0 - ORBIT_ZOOM_SPEED).powf(amount);
    }

    /// Apply a share of the queued input for `frames` reference frames.
    pub fn step(&mut self, frames: f32) {
        let share = 1.0 - (1.0 - ORBIT_DAMPING_FACTOR).powf(frames);

        self.azimuth += self.azimuth_delta * share;
        self.polar += self.polar_delta * share;
        self.azimuth_delta *= 1.0 - share;
        self.polar_delta *= 1.0 - share;

        self.radius *= self.zoom_scale;
        self.zoom_scale = 1.0;

        self.clamp();
    }

    /// Whether the current (or last) left-button press moved far enough to be a drag.
    pub fn is_drag(&self) -> bool {
        self.drag_distance > CLICK_DRAG_TOLERANCE
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    fn clamp(&mut self) {
        self.polar = self
            .polar
            .clamp(ORBIT_MIN_POLAR_ANGLE, ORBIT_MAX_POLAR_ANGLE);
        self.radius = self.radius.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(Vec3::splat(10.0), Vec3::ZERO)
    }
}

/// Spawn the scene camera at the launch position, looking at the origin.
pub fn spawn_orbit_camera(commands: &mut Commands, launch_config: &LaunchConfig) {
    let eye = launch_config.camera_start();

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        scene_fog(),
    ));
    commands.insert_resource(OrbitCamera::from_position(eye, Vec3::ZERO));

    info!("Camera placed at {:?}", eye);
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        orbit.drag_distance = 0.0;
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.drag_distance += mouse_delta.length();
        orbit.rotate(mouse_delta);
    }

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }

    orbit.step(time.delta_secs() * 60.0);

    let eye = orbit.eye();
    *camera_transform = Transform::from_translation(eye).looking_at(orbit.target, Vec3::Y);
}
