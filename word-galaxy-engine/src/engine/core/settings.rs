use bevy::prelude::*;
use constants::{camera, galaxy, render_settings};

use crate::engine::camera::orbit_camera::CameraPose;

/// Runtime configuration, seeded from the `constants` crate.
/// Embedders override fields before building the app with `create_app_with`.
#[derive(Resource, Debug, Clone)]
pub struct GalaxySettings {
    pub scale_factor: f32,
    pub sphere_radius: f32,
    pub home: CameraPose,
    pub reset_step: f32,
    pub orbit: OrbitSettings,
    pub label_font_path: Option<String>,
    pub label_font_size: f32,
    /// Static collection loaded at startup; `None` waits for host data only.
    pub snapshot_path: Option<String>,
    pub canvas_selector: String,
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitSettings {
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_distance: camera::MIN_ORBIT_DISTANCE,
            max_distance: camera::MAX_ORBIT_DISTANCE,
            damping_factor: camera::ORBIT_DAMPING_FACTOR,
            auto_rotate_speed: camera::AUTO_ROTATE_SPEED,
            rotate_speed: camera::ROTATE_SPEED,
            zoom_speed: camera::ZOOM_SPEED,
            pan_speed: camera::PAN_SPEED,
        }
    }
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self {
            scale_factor: galaxy::SCALE_FACTOR,
            sphere_radius: galaxy::REFERENCE_SPHERE_RADIUS,
            home: CameraPose {
                position: camera::HOME_CAMERA_POSITION,
                target: camera::HOME_CAMERA_TARGET,
            },
            reset_step: camera::RESET_PROGRESS_STEP,
            orbit: OrbitSettings::default(),
            label_font_path: Some(render_settings::LABEL_FONT_PATH.to_string()),
            label_font_size: render_settings::LABEL_FONT_SIZE,
            snapshot_path: Some(render_settings::SNAPSHOT_PATH.to_string()),
            canvas_selector: render_settings::CANVAS_SELECTOR.to_string(),
        }
    }
}
