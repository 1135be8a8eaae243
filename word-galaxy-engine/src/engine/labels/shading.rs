use bevy::prelude::*;
use constants::render_settings::LABEL_BACKGROUND_ALPHA;

use super::OverlayLabel;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::settings::GalaxySettings;
use crate::galaxy::geometry::DistanceBand;
use crate::galaxy::geometry::opacity_for_distance;

/// Fade labels with distance from the viewer, relative to the reference sphere.
pub fn shade_labels(
    orbit: Res<OrbitCamera>,
    settings: Res<GalaxySettings>,
    mut labels: Query<(&mut OverlayLabel, &mut TextColor, &mut BackgroundColor)>,
) {
    let camera_position = orbit.pose.position;
    let band = DistanceBand::around(camera_position, settings.sphere_radius);

    for (mut label, mut text_colour, mut background) in &mut labels {
        let distance = label.world_position.distance(camera_position);
        let opacity = opacity_for_distance(distance, &band);

        label.opacity = opacity;
        text_colour.0 = label.colour.with_alpha(opacity);
        background.0 = label.colour.with_alpha(LABEL_BACKGROUND_ALPHA * opacity);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::camera::orbit_camera::CameraPose;
    use crate::engine::core::settings::OrbitSettings;
    use crate::galaxy::item::VisualizationItem;

    fn spawn_label(app: &mut App, world_position: Vec3) -> Entity {
        app.world_mut()
            .spawn((
                OverlayLabel {
                    item: Arc::new(VisualizationItem::new(1, "a", "b")),
                    world_position,
                    colour: Color::WHITE,
                    opacity: 1.0,
                    generation: 1,
                    order: 0,
                },
                TextColor(Color::WHITE),
                BackgroundColor(Color::WHITE),
            ))
            .id()
    }

    #[test]
    fn nearer_labels_are_more_opaque() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GalaxySettings::default())
            .insert_resource(OrbitCamera::new(
                CameraPose {
                    position: Vec3::new(0.0, 0.0, 900.0),
                    target: Vec3::ZERO,
                },
                OrbitSettings::default(),
            ))
            .add_systems(Update, shade_labels);

        let near = spawn_label(&mut app, Vec3::new(0.0, 0.0, 400.0));
        let middle = spawn_label(&mut app, Vec3::ZERO);
        let far = spawn_label(&mut app, Vec3::new(0.0, 0.0, -400.0));
        app.update();

        let opacity = |entity| app.world().get::<OverlayLabel>(entity).unwrap().opacity;
        assert_eq!(opacity(near), 1.0);
        assert!(opacity(near) > opacity(middle));
        assert!(opacity(middle) > opacity(far));
        assert!((opacity(far) - 0.1).abs() < 1.0e-6);

        let alpha = app.world().get::<TextColor>(middle).unwrap().0.alpha();
        assert!((alpha - opacity(middle)).abs() < 1.0e-6);
    }
}
