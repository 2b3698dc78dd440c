/// Objects per unit of brush area at density 1.0.
pub const AREA_DENSITY_SCALE: f32 = 10.0;

/// Base spacing between placed objects at the lowest density.
pub const SPARSE_SPACING: f32 = 5.0;

/// Base spacing between placed objects at the highest density.
pub const DENSE_SPACING: f32 = 0.3;

/// Lower bound of the per-candidate spacing multiplier.
pub const SPACING_JITTER_MIN: f32 = 0.7;

/// Upper bound of the per-candidate spacing multiplier.
pub const SPACING_JITTER_MAX: f32 = 1.3;

/// Sampling attempts allowed per requested object before giving up.
pub const ATTEMPTS_PER_OBJECT: usize = 20;

/// Existing instances within `size * NEIGHBOR_SEARCH_FACTOR` count as occupied.
pub const NEIGHBOR_SEARCH_FACTOR: f32 = 2.0;

/// Pick radius of the single-object eraser.
pub const POINT_ERASE_RADIUS: f32 = 0.5;

/// Half-width of the line eraser.
pub const LINE_ERASE_HALF_WIDTH: f32 = 0.3;

/// Chance that a placement is mirrored when mirroring is enabled.
pub const MIRROR_PROBABILITY: f64 = 0.5;
