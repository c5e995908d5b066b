//! Tuning constants and defaults.

/// Number of decimals kept when grouping vertices by rest position.
///
/// Vertices duplicated along UV seams share a position up to this
/// precision and are treated as one topological point.
pub const POSITION_PRECISION: u32 = 6;

/// Maximum |dot| between consecutive side directions for four points
/// to be considered a near-planar quad.
pub const QUAD_DOT_THRESHOLD: f32 = 0.2;

/// Maximum number of keypoints bound to a single vertex.
pub const MAX_INFLUENCES: usize = 3;

/// Exponent scale of the three-keypoint falloff `exp(k * d / mean)`.
pub const INFLUENCE_FALLOFF: f64 = 2.0;

/// Default gain applied when unprojecting a viewport residual.
pub const DEFAULT_UNPROJECT_GAIN: f32 = 2.0;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
