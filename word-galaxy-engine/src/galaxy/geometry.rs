//! Pure mapping from normalised word coordinates to world space and the
//! distance-based label shading derived from the viewer position.

use bevy::math::Vec3;
use constants::galaxy::{MAX_LABEL_OPACITY, MIN_LABEL_OPACITY, OPACITY_FALLOFF_EXPONENT};

use super::item::VisualizationItem;

/// Scale a normalised coordinate into world units, componentwise.
pub fn to_world(position: Vec3, scale_factor: f32) -> Vec3 {
    position * scale_factor
}

pub fn item_world_position(item: &VisualizationItem, scale_factor: f32) -> Vec3 {
    to_world(item.position, scale_factor)
}

/// Distance band a label can occupy relative to the camera, bounded by the
/// reference sphere around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBand {
    pub min: f32,
    pub max: f32,
}

impl DistanceBand {
    pub fn around(camera_position: Vec3, sphere_radius: f32) -> Self {
        let camera_distance = camera_position.length();
        Self {
            min: (camera_distance - sphere_radius).max(0.0),
            max: camera_distance + sphere_radius,
        }
    }

    /// Position of `distance` inside the band, clamped to [0, 1].
    pub fn normalise(&self, distance: f32) -> f32 {
        let range = self.max - self.min;
        let range = if range > 0.0 { range } else { 1.0 };
        ((distance - self.min) / range).clamp(0.0, 1.0)
    }
}

/// Opacity for a label at `distance`; nearer labels are more opaque.
pub fn opacity_for_distance(distance: f32, band: &DistanceBand) -> f32 {
    let normalised = band.normalise(distance);
    (1.0 - normalised.powf(OPACITY_FALLOFF_EXPONENT)).clamp(MIN_LABEL_OPACITY, MAX_LABEL_OPACITY)
}

pub fn label_opacity(label_position: Vec3, camera_position: Vec3, sphere_radius: f32) -> f32 {
    let band = DistanceBand::around(camera_position, sphere_radius);
    opacity_for_distance(label_position.distance(camera_position), &band)
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::galaxy::{REFERENCE_SPHERE_RADIUS, SCALE_FACTOR};

    #[test]
    fn world_position_is_exact_componentwise_scale() {
        let samples = [
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(0.25, -0.5, 0.75),
            Vec3::new(0.1, 0.2, -0.3),
        ];
        for sample in samples {
            let world = to_world(sample, SCALE_FACTOR);
            assert_eq!(world.x, sample.x * SCALE_FACTOR);
            assert_eq!(world.y, sample.y * SCALE_FACTOR);
            assert_eq!(world.z, sample.z * SCALE_FACTOR);
        }
    }

    #[test]
    fn band_never_goes_negative() {
        let band = DistanceBand::around(Vec3::new(0.0, 0.0, 100.0), REFERENCE_SPHERE_RADIUS);
        assert_eq!(band.min, 0.0);
        assert_eq!(band.max, 100.0 + REFERENCE_SPHERE_RADIUS);
    }

    #[test]
    fn opacity_decreases_with_distance() {
        let camera = Vec3::new(0.0, 200.0, 900.0);
        let band = DistanceBand::around(camera, REFERENCE_SPHERE_RADIUS);

        let mut previous = f32::INFINITY;
        let steps = 50;
        for i in 0..=steps {
            let distance = band.min + (band.max - band.min) * i as f32 / steps as f32;
            let opacity = opacity_for_distance(distance, &band);
            assert!(opacity <= previous, "opacity rose at step {i}");
            assert!((MIN_LABEL_OPACITY..=MAX_LABEL_OPACITY).contains(&opacity));
            previous = opacity;
        }
    }

    #[test]
    fn opacity_stays_in_range_outside_band() {
        let camera = Vec3::new(0.0, 0.0, 1500.0);
        for distance in [0.0, 10.0, 5000.0, f32::MAX] {
            let band = DistanceBand::around(camera, REFERENCE_SPHERE_RADIUS);
            let opacity = opacity_for_distance(distance, &band);
            assert!((MIN_LABEL_OPACITY..=MAX_LABEL_OPACITY).contains(&opacity));
        }
    }

    #[test]
    fn nearest_label_fully_opaque_farthest_faded() {
        let camera = Vec3::new(0.0, 0.0, 900.0);
        let near = Vec3::new(0.0, 0.0, REFERENCE_SPHERE_RADIUS);
        let far = Vec3::new(0.0, 0.0, -REFERENCE_SPHERE_RADIUS);

        assert_eq!(label_opacity(near, camera, REFERENCE_SPHERE_RADIUS), MAX_LABEL_OPACITY);
        assert_eq!(label_opacity(far, camera, REFERENCE_SPHERE_RADIUS), MIN_LABEL_OPACITY);
    }
}
