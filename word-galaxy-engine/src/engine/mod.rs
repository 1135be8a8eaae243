/// Free-orbit camera and the reset-to-home animation.
pub mod camera;

/// Application setup, state, settings and frame ordering.
pub mod core;

/// Word label overlay: sync, shading and screen projection.
pub mod labels;

/// Startup loading of the optional word snapshot.
pub mod loading;

/// Star field and reference sphere.
pub mod scene;

/// Diagnostics and stats overlay.
pub mod systems;
