//! Word galaxy engine: vocabulary rendered as a navigable 3D cloud of labelled points.
//!
//! Words arrive with precomputed normalised coordinates and spaced-repetition
//! metadata. The engine filters them, floats one label per visible word over
//! the scene, fades labels with distance and reports picked words back to the
//! embedding host.

/// Host-facing operations mutating engine state.
pub mod api;

/// Bevy application: camera, labels, scene, loading and frame ordering.
pub mod engine;

pub mod error;

/// Pure word model, filter evaluation, geometry and cluster catalogue.
pub mod galaxy;

/// JSON-RPC bridge to the embedding page.
pub mod rpc;

/// Label selection and keyboard shortcuts.
pub mod tools;

pub use api::GalaxyControl;
pub use engine::core::app_setup::{create_app, create_app_with};
pub use engine::core::settings::GalaxySettings;
pub use error::{GalaxyError, GalaxyResult};
