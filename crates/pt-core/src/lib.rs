//! Prime tension engine.
//!
//! Sieves primes, splits the primes of `[11, limit)` into twin-skipped,
//! orphan, weak-tension and untracked classes, and measures how stable the
//! orphan density is against the `x / ln(x)²` model.
//!
//! Zero I/O. Randomness only enters through an injected [`TensionSource`].

pub mod classify;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod histogram;
pub mod sieve;
pub mod source;
pub mod spiral;
pub mod stability;

pub use classify::{Classification, Outcome, classify, classify_prime};
pub use constants::{
    CHECKPOINT_COUNT, DEFAULT_LIMIT, DEFAULT_MAX_CHECKPOINT, DEFAULT_SPIRAL_LIMIT,
    DEFAULT_TENSION_BINS, DEFAULT_TENSION_LIMIT, MIN_CHECKPOINT, ONE_THIRD_MARKER,
    ORPHAN_TENSION, SCAN_START, STABILITY_TARGET,
};
pub use dataset::{Bundle, CURRENT_VERSION, Dataset, export_json, generate_data, import_json};
pub use error::{EngineError, Result};
pub use histogram::Histogram;
pub use sieve::{SieveTable, generate_sieve};
pub use source::{FixedTensionSource, RngTensionSource, TensionSource};
pub use spiral::{SpiralPoint, spiral_points};
pub use stability::{StabilityCurve, StabilityPoint, stability_curve};
