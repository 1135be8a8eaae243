//! Galaxy camera: free-orbit controls and the eased reset-to-home animation.
//!
//! Both mutate the shared [`orbit_camera::OrbitCamera`] pose; the animator runs
//! first each frame so user input layered on top can still nudge the camera.

/// Orbit camera resource, mouse controller and transform sync.
pub mod orbit_camera;

/// Idle/resetting state machine interpolating the camera back to its home pose.
pub mod reset_animation;
