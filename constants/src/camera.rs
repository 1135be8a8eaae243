use bevy::math::Vec3;

/// Initial "north" camera position, also the target of the reset animation.
pub const HOME_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 200.0, 900.0);

/// Point the camera orbits around when at home.
pub const HOME_CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Linear progress added to the reset animation every frame.
pub const RESET_PROGRESS_STEP: f32 = 0.03;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 5000.0;

/// Closest the orbit camera may dolly towards its target.
pub const MIN_ORBIT_DISTANCE: f32 = 100.0;

/// Furthest the orbit camera may dolly away from its target.
pub const MAX_ORBIT_DISTANCE: f32 = 2000.0;

/// Fraction of pending orbit motion applied per frame; the rest decays.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Idle rotation speed; 1.0 completes one turn around the target per minute.
pub const AUTO_ROTATE_SPEED: f32 = 0.5;

pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.0;
pub const PAN_SPEED: f32 = 1.0;

/// Pixel-unit scroll events are scaled down to roughly match line scroll notches.
pub const PIXEL_SCROLL_SCALE: f32 = 0.01;

/// Keeps the polar angle away from the poles so `looking_at` stays well defined.
pub const POLAR_EPSILON: f32 = 1.0e-4;
