use bevy::asset::RenderAssetUsages;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;
use constants::starfield::{STAR_COUNT, STAR_FIELD_RADIUS, STAR_PALETTE};
use rand::Rng;

#[derive(Component)]
pub struct Starfield;

/// Random star positions inside a cube of half-extent `radius`, each with a palette colour.
pub fn star_vertices(
    rng: &mut impl Rng,
    count: usize,
    radius: f32,
) -> (Vec<[f32; 3]>, Vec<[f32; 4]>) {
    let palette: Vec<[f32; 4]> = STAR_PALETTE
        .iter()
        .map(|[r, g, b]| Color::srgb_u8(*r, *g, *b).to_linear().to_f32_array())
        .collect();

    let mut positions = Vec::with_capacity(count);
    let mut colours = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push([
            rng.gen_range(-1.0..1.0) * radius,
            rng.gen_range(-1.0..1.0) * radius,
            rng.gen_range(-1.0..1.0) * radius,
        ]);
        colours.push(palette[rng.gen_range(0..palette.len())]);
    }

    (positions, colours)
}

fn create_starfield_mesh(positions: Vec<[f32; 3]>, colours: Vec<[f32; 4]>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);
    mesh
}

pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let (positions, colours) = star_vertices(&mut rng, STAR_COUNT, STAR_FIELD_RADIUS);

    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(0.0..2.0),
        rng.gen_range(0.0..2.0),
        rng.gen_range(0.0..2.0),
    );

    commands.spawn((
        Mesh3d(meshes.add(create_starfield_mesh(positions, colours))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            fog_enabled: false,
            ..default()
        })),
        Transform::from_rotation(rotation),
        Starfield,
        NotShadowCaster,
        NoFrustumCulling,
        Pickable::IGNORE,
        Name::new("Starfield"),
    ));

    info!("Starfield spawned with {} stars", STAR_COUNT);
}
