use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::{FIELD_OF_VIEW_DEGREES, PIXEL_SCROLL_SCALE, POLAR_EPSILON};

use crate::engine::core::settings::OrbitSettings;
use crate::tools::selection::LabelPointerGuard;

/// Marker for the single perspective camera viewing the galaxy.
#[derive(Component)]
pub struct GalaxyCamera;

/// Camera position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Free-orbit camera state. The pose is authoritative; the camera `Transform`
/// is rewritten from it every frame.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub pose: CameraPose,
    pub auto_rotate: bool,
    pub settings: OrbitSettings,
    /// Pending (theta, phi) rotation, consumed gradually by damping.
    spherical_delta: Vec2,
    pan_offset: Vec3,
    zoom_scale: f32,
    pub is_rotating: bool,
    pub is_panning: bool,
}

impl OrbitCamera {
    pub fn new(pose: CameraPose, settings: OrbitSettings) -> Self {
        Self {
            pose,
            auto_rotate: true,
            settings,
            spherical_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
            zoom_scale: 1.0,
            is_rotating: false,
            is_panning: false,
        }
    }

    /// Queue a rotation around the target: theta about the vertical axis, phi towards the poles.
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        self.spherical_delta += Vec2::new(delta_theta, delta_phi);
    }

    /// Queue a radius change; values below one move the camera closer.
    pub fn dolly(&mut self, scale: f32) {
        if scale > 0.0 {
            self.zoom_scale *= scale;
        }
    }

    /// Queue a screen-space pan of `screen_delta` pixels on a viewport `viewport_height` tall.
    pub fn pan(&mut self, screen_delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let rotation = self.transform().rotation;
        let target_distance = self.pose.position.distance(self.pose.target)
            * (FIELD_OF_VIEW_DEGREES.to_radians() * 0.5).tan();
        let scale = 2.0 * target_distance / viewport_height * self.settings.pan_speed;

        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.pan_offset += -right * screen_delta.x * scale + up * screen_delta.y * scale;
    }

    /// Drop any queued motion so the next update leaves the pose untouched.
    pub fn halt(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.zoom_scale = 1.0;
    }

    /// Angle swept by idle rotation over `delta_secs`.
    fn auto_rotate_angle(&self, delta_secs: f32) -> f32 {
        TAU / 60.0 * self.settings.auto_rotate_speed * delta_secs
    }

    /// Integrate queued input, idle rotation and damping into the pose.
    /// Returns whether the pose moved.
    pub fn update(&mut self, delta_secs: f32) -> bool {
        if self.auto_rotate && !self.is_rotating {
            let angle = self.auto_rotate_angle(delta_secs);
            self.spherical_delta.x -= angle;
        }

        let idle = self.spherical_delta.length_squared() < 1.0e-12
            && self.pan_offset.length_squared() < 1.0e-12
            && self.zoom_scale == 1.0;
        if idle {
            return false;
        }

        let offset = self.pose.position - self.pose.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.halt();
            return false;
        }

        let damping = self.settings.damping_factor;
        let theta = offset.x.atan2(offset.z) + self.spherical_delta.x * damping;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.spherical_delta.y * damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let radius = (radius * self.zoom_scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);

        self.pose.target += self.pan_offset * damping;
        self.pose.position = self.pose.target + spherical_to_cartesian(radius, theta, phi);

        self.spherical_delta *= 1.0 - damping;
        self.pan_offset *= 1.0 - damping;
        self.zoom_scale = 1.0;
        true
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.pose.position).looking_at(self.pose.target, Vec3::Y)
    }
}

/// Y-up spherical coordinates; theta is measured from +Z towards +X.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}

/// Translate mouse input into orbit motion. Left drag rotates, right or middle
/// drag pans, the wheel dollies. Drags that start on a label are ignored.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut guard: ResMut<LabelPointerGuard>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let any_pressed = mouse_button.any_pressed([
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
    ]);
    if guard.engaged && !any_pressed {
        guard.engaged = false;
    }

    let viewport_height = windows
        .single()
        .map(|window| window.height())
        .unwrap_or(0.0);

    orbit.is_rotating = !guard.engaged && mouse_button.pressed(MouseButton::Left);
    orbit.is_panning = !guard.engaged
        && mouse_button.any_pressed([MouseButton::Right, MouseButton::Middle]);

    if mouse_delta != Vec2::ZERO && viewport_height > 0.0 {
        if orbit.is_rotating {
            let speed = orbit.settings.rotate_speed;
            orbit.rotate(
                -TAU * mouse_delta.x / viewport_height * speed,
                -TAU * mouse_delta.y / viewport_height * speed,
            );
        } else if orbit.is_panning {
            orbit.pan(mouse_delta, viewport_height);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        let zoom_speed = orbit.settings.zoom_speed;
        orbit.dolly(0.95_f32.powf(zoom_speed * scroll_accum));
    }

    orbit.update(time.delta_secs());
}

/// Write the orbit pose into the camera entity's transform.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<GalaxyCamera>>,
) {
    if let Ok(mut camera_transform) = cameras.single_mut() {
        *camera_transform = orbit.transform();
    }
}
