//! Static scene dressing around the word cloud.
//!
//! Provides the seeded background star field and the translucent wireframe
//! sphere that marks the extent of the galaxy.

/// Translucent wireframe sphere bounding the normalised coordinate space.
pub mod reference_sphere;

/// Seeded point-list star field scattered around the galaxy.
///
/// Deterministic per seed so the sky is identical between sessions.
pub mod starfield;
