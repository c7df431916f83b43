/// First integer examined by the classifier. Fixed, not configurable.
pub const SCAN_START: u64 = 11;

/// Default limit for `generate_data`.
pub const DEFAULT_LIMIT: u64 = 200_000;

/// Lower bound of the stability checkpoint range.
pub const MIN_CHECKPOINT: u64 = 10_000;

/// Default upper bound of the stability checkpoint range.
pub const DEFAULT_MAX_CHECKPOINT: u64 = 200_000;

/// Number of evenly spaced stability checkpoints.
pub const CHECKPOINT_COUNT: usize = 500;

/// Empirical target the stability ratio is compared against.
pub const STABILITY_TARGET: f64 = 0.88;

/// Tension recorded for every orphan prime.
pub const ORPHAN_TENSION: f64 = 1.0 / 3.0;

/// Beta distribution shape parameters for weak-tension samples.
pub const TENSION_ALPHA: f64 = 2.0;
pub const TENSION_BETA: f64 = 5.0;

/// Scale applied to every weak-tension sample, keeping it in [0, 0.3).
pub const TENSION_SCALE: f64 = 0.3;

/// Reference line drawn on the tension histogram.
pub const ONE_THIRD_MARKER: f64 = 0.333;

/// Default bin count for the tension histogram.
pub const DEFAULT_TENSION_BINS: usize = 30;

/// Default limit for the tension histogram dataset.
pub const DEFAULT_TENSION_LIMIT: u64 = 50_000;

/// Default limit for the prime spiral.
pub const DEFAULT_SPIRAL_LIMIT: u64 = 8_000;

/// Vertical spacing divisor of the prime spiral: z = n / SPIRAL_Z_SCALE.
pub const SPIRAL_Z_SCALE: f64 = 100.0;
