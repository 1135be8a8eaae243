/// Multiplier from normalised coordinates ([-1, 1] per axis) to world units.
pub const SCALE_FACTOR: f32 = 400.0;

/// Radius of the reference sphere used to normalise label distances.
/// Matches the scale factor so the sphere encloses every normalised position.
pub const REFERENCE_SPHERE_RADIUS: f32 = SCALE_FACTOR;

/// Lowest opacity a label can fade to.
pub const MIN_LABEL_OPACITY: f32 = 0.1;

/// Highest opacity a label can reach.
pub const MAX_LABEL_OPACITY: f32 = 1.0;

/// Exponent applied to the normalised distance before inverting it into opacity.
pub const OPACITY_FALLOFF_EXPONENT: f32 = 1.5;

/// Length of one day in milliseconds, used by the date bucket filters.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
