//! Word collection model, filter evaluation and spatial helpers.
//!
//! Everything here is free of ECS state so it can be exercised without a display.

/// Cluster catalogue for the host selector and cluster palette lookup.
pub mod clusters;

/// Seven-predicate filter evaluator and the criteria value object.
pub mod filter;

/// Normalised-to-world mapping and distance-based label opacity.
pub mod geometry;

/// Backend word records and their renderable projection.
pub mod item;
