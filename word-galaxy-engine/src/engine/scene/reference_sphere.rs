use bevy::prelude::*;
use constants::render_settings::{
    REFERENCE_SPHERE_COLOUR, REFERENCE_SPHERE_OPACITY, REFERENCE_SPHERE_SEGMENTS,
};

use crate::galaxy::clusters::hex_colour;

/// Faint sphere marking the extent of the word cloud.
#[derive(Component)]
pub struct ReferenceSphere;

pub fn create_reference_sphere(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    radius: f32,
) {
    let colour = hex_colour(REFERENCE_SPHERE_COLOUR);
    let mesh = Sphere::new(radius)
        .mesh()
        .uv(REFERENCE_SPHERE_SEGMENTS, REFERENCE_SPHERE_SEGMENTS);

    let material = materials.add(StandardMaterial {
        base_color: colour.with_alpha(REFERENCE_SPHERE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let mut sphere = commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        ReferenceSphere,
    ));

    // Line polygon mode is unavailable on WebGPU.
    #[cfg(not(target_arch = "wasm32"))]
    {
        use bevy::pbr::wireframe::{Wireframe, WireframeColor};
        sphere.insert((
            Wireframe,
            WireframeColor {
                color: colour.with_alpha(REFERENCE_SPHERE_OPACITY),
            },
        ));
    }
    #[cfg(target_arch = "wasm32")]
    let _ = &mut sphere;
}
