//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, frame ordering and
//! runtime settings for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the galaxy scene, label overlay, host bridge
/// and platform-specific configuration.
pub mod app_setup;

/// Application state, word collection and filter resources.
pub mod app_state;

/// Ordered per-frame system sets and surface resize tracking.
pub mod frame;

/// Runtime settings seeded from the `constants` crate.
pub mod settings;

/// Platform-specific window configuration and drawing surface checks.
pub mod window_config;
