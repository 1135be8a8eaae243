//! Shared compile-time configuration for the word galaxy engine.
//!
//! Values mirror the tuning of the galaxy view: world scale, the home camera pose,
//! orbit control behaviour, cluster colours and scene dressing.

/// World scale, reference sphere and label shading parameters.
pub mod galaxy;

/// Home pose, orbit control limits and reset animation step.
pub mod camera;

/// Fixed cluster palette with a neutral fallback colour.
pub mod palette;

/// Background, fog, star field and overlay styling.
pub mod render_settings;
