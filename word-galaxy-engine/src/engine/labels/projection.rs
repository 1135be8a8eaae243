use bevy::prelude::*;

use super::OverlayLabel;
use crate::engine::camera::orbit_camera::GalaxyCamera;
use crate::engine::core::frame::SurfaceSize;

/// Place each label over its projected world position. Labels behind the
/// camera, outside the depth range or off the surface are hidden; nearer
/// labels draw on top.
pub fn project_labels(
    cameras: Query<(&Camera, &Transform), With<GalaxyCamera>>,
    surface: Res<SurfaceSize>,
    mut labels: Query<(
        &OverlayLabel,
        &ComputedNode,
        &mut Node,
        &mut Visibility,
        &mut ZIndex,
    )>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    // The transform was written this frame; the global one lags until propagation.
    let camera_global = GlobalTransform::from(*camera_transform);
    let forward = camera_transform.forward();

    for (label, computed, mut node, mut visibility, mut z_index) in &mut labels {
        let to_label = label.world_position - camera_transform.translation;
        let in_front = to_label.dot(*forward) > 0.0;

        let viewport = camera
            .world_to_viewport(&camera_global, label.world_position)
            .ok()
            .filter(|screen| in_front && surface.contains(*screen));

        let Some(screen) = viewport else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        let half_size = computed.size() * computed.inverse_scale_factor() * 0.5;
        node.left = Val::Px(screen.x - half_size.x);
        node.top = Val::Px(screen.y - half_size.y);
        visibility.set_if_neq(Visibility::Inherited);
        z_index.set_if_neq(ZIndex(depth_order(to_label.length(), label.order)));
    }
}

/// Higher for nearer labels; collection order breaks ties.
pub fn depth_order(distance: f32, order: usize) -> i32 {
    let depth = (distance.max(0.0) * 4.0).round() as i64;
    let tie = (order % 4) as i64;
    (-(depth * 4) - tie).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
