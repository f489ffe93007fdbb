use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use constants::tracer::*;
use rand::Rng;

use super::ambience::hex_colour;

/// Smallest rendered radius; keeps the transform invertible once a particle has decayed away.
const MIN_TRACER_RADIUS: f32 = 1e-4;

/// One glowing particle in a spacecraft trail.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TracerParticle {
    /// Spawn position the trail drifts away from.
    pub origin: Vec3,
    pub offset: Vec3,
    pub size: f32,
}

impl TracerParticle {
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            offset: Vec3::ZERO,
            size: TRACER_INITIAL_SIZE,
        }
    }

    /// Step the particle by `dt` seconds. `jitter` in [0, 1) scales the extra Z drift.
    pub fn advance(&mut self, dt: f32, jitter: f32) {
        let frames = dt * REFERENCE_FRAME_RATE;

        self.offset.z -= (TRACER_Z_DRIFT + jitter * TRACER_Z_JITTER) * frames;
        self.offset.x -= TRACER_X_DRIFT * frames;

        if self.offset.z < TRACER_RESET_Z && self.offset.x < TRACER_RESET_X {
            self.offset = Vec3::ZERO;
            self.size = TRACER_RESET_SIZE;
        }
        if self.size < TRACER_MAX_SIZE {
            self.size -= TRACER_SIZE_DECAY * frames;
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.origin + self.offset
    }

    pub fn radius(&self) -> f32 {
        (self.size * TRACER_RADIUS_PER_SIZE).max(MIN_TRACER_RADIUS)
    }
}

/// Where particle `index` of a trail starts. `depth_jitter` in [0, 1) spreads it along Z.
pub fn tracer_origin(index: usize, depth_jitter: f32) -> Vec3 {
    let mut z = -7.0 - depth_jitter * 4.0 + 1.0;
    if index > 8 && index < 24 {
        z -= 1.5;
    }
    Vec3::new(-2.1 + index as f32 / 10.0, 0.6, z)
}

pub fn spawn_tracers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(8, 6));
    let material = materials.add(StandardMaterial {
        base_color: hex_colour(TRACER_COLOUR),
        emissive: hex_colour(TRACER_COLOUR).to_linear(),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    let mut rng = rand::thread_rng();
    for system in 0..TRACER_SYSTEM_COUNT {
        for index in 0..PARTICLES_PER_SYSTEM {
            let particle = TracerParticle::new(tracer_origin(index, rng.r#gen()));
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(particle.translation())
                    .with_scale(Vec3::splat(particle.radius())),
                particle,
                NotShadowCaster,
                Pickable::IGNORE,
                Name::new(format!("Tracer {system}.{index}")),
            ));
        }
    }

    debug!(
        "Spawned {} tracer particles",
        TRACER_SYSTEM_COUNT * PARTICLES_PER_SYSTEM
    );
}

pub fn update_tracers(time: Res<Time>, mut tracers: Query<(&mut TracerParticle, &mut Transform)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let mut rng = rand::thread_rng();
    for (mut particle, mut transform) in tracers.iter_mut() {
        particle.advance(dt, rng.r#gen());
        transform.translation = particle.translation();
        transform.scale = Vec3::splat(particle.radius());
    }
}
