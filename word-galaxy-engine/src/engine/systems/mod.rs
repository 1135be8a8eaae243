//! Runtime diagnostics for the galaxy view.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native
/// stats overlay with frame rate and visible word counts.
pub mod fps_tracking;
