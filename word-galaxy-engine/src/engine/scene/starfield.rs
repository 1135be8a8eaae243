/// Static background star field rendered as a single point-list mesh
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;
use constants::render_settings::{STAR_COLOUR, STAR_COUNT, STAR_FIELD_SEED, STAR_FIELD_SPREAD};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::galaxy::clusters::hex_colour;

#[derive(Component)]
pub struct StarField;

/// Uniformly scattered points inside a cube of edge `spread` centred on the origin.
/// The same seed always yields the same sky.
pub fn star_positions(count: usize, spread: f32, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let half = spread * 0.5;

    (0..count)
        .map(|_| {
            [
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ]
        })
        .collect()
}

pub fn create_star_field(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let positions = star_positions(STAR_COUNT, STAR_FIELD_SPREAD, STAR_FIELD_SEED);
    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    let material = materials.add(StandardMaterial {
        base_color: hex_colour(STAR_COLOUR),
        unlit: true,
        // Stars sit far beyond the galaxy; keep them visible through the fog.
        fog_enabled: false,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        NoFrustumCulling,
        StarField,
    ));
    info!("Star field created: {} stars", STAR_COUNT);
}
