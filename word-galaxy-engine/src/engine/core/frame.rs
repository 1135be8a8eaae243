//! Per-frame ordering of the galaxy systems.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::engine::camera::orbit_camera::GalaxyCamera;

/// Ordered stages of one frame. Bevy renders the scene and the UI overlay
/// after `Update`, so every label is placed before it is drawn.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalaxyFrameSet {
    /// Host messages and keyboard shortcuts.
    Input,
    /// Rebuild overlay labels when the data or filters changed.
    Sync,
    /// Camera reset animation.
    Animate,
    /// Orbit input, damping and idle rotation.
    Controls,
    /// Write the camera pose into its transform.
    Camera,
    /// Distance-based label opacity.
    Shade,
    /// Screen placement and depth ordering of labels.
    Project,
}

/// Drawable surface size in logical pixels.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Whether a viewport point lies on the surface. An unmeasured surface contains everything.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return true;
        }
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

pub struct FrameSchedulerPlugin;

impl Plugin for FrameSchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceSize>()
            .configure_sets(
                Update,
                (
                    GalaxyFrameSet::Input,
                    GalaxyFrameSet::Sync,
                    GalaxyFrameSet::Animate,
                    GalaxyFrameSet::Controls,
                    GalaxyFrameSet::Camera,
                    GalaxyFrameSet::Shade,
                    GalaxyFrameSet::Project,
                )
                    .chain(),
            )
            .add_systems(PostStartup, init_surface_size)
            .add_systems(Update, track_surface_resize.in_set(GalaxyFrameSet::Input));
    }
}

fn init_surface_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut surface: ResMut<SurfaceSize>,
) {
    if let Ok(window) = windows.single() {
        surface.width = window.width();
        surface.height = window.height();
    }
}

/// Keep the surface size and camera aspect ratio in step with the window.
pub fn track_surface_resize(
    mut resized: EventReader<WindowResized>,
    mut surface: ResMut<SurfaceSize>,
    mut projections: Query<&mut Projection, With<GalaxyCamera>>,
) {
    let Some(latest) = resized.read().last() else {
        return;
    };

    surface.width = latest.width;
    surface.height = latest.height;
    debug!("Surface resized to {}x{}", latest.width, latest.height);

    for mut projection in &mut projections {
        if let Projection::Perspective(ref mut perspective) = *projection {
            perspective.aspect_ratio = surface.aspect_ratio();
        }
    }
}
