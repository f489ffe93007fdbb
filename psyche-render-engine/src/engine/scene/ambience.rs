use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, AMBIENT_LIGHT_COLOUR, DIRECTIONAL_LIGHT_COLOUR,
    DIRECTIONAL_LIGHT_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITION, FOG_COLOUR, FOG_DENSITY,
};

/// Convert 0xRRGGBB to an sRGB colour.
pub fn hex_colour(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: hex_colour(AMBIENT_LIGHT_COLOUR),
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: hex_colour(DIRECTIONAL_LIGHT_COLOUR),
            illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Thin exponential haze, attached to the camera.
pub fn scene_fog() -> DistanceFog {
    DistanceFog {
        color: hex_colour(FOG_COLOUR),
        falloff: FogFalloff::Exponential {
            density: FOG_DENSITY,
        },
        ..default()
    }
}
