//! Random sources for weak-tension samples.
//!
//! The classifier never touches a global RNG. It draws through a
//! [`TensionSource`] handed in by the caller, so tests can replay a fixed
//! sequence and production can seed or not as it likes.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::error::{EngineError, Result};

/// Capability that produces Beta-distributed samples in [0, 1).
pub trait TensionSource {
    fn next_beta(&mut self, alpha: f64, beta: f64) -> Result<f64>;
}

impl<T: TensionSource + ?Sized> TensionSource for &mut T {
    fn next_beta(&mut self, alpha: f64, beta: f64) -> Result<f64> {
        (**self).next_beta(alpha, beta)
    }
}

/// Largest `f64` strictly below 1.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Keep a Beta draw inside [0, 1); the sampler may round up to exactly 1.
fn below_one(sample: f64) -> f64 {
    sample.min(BELOW_ONE)
}

/// Samples `Beta(alpha, beta)` from any `rand` generator.
#[derive(Debug)]
pub struct RngTensionSource<R> {
    rng: R,
    cached: Option<(f64, f64, Beta<f64>)>,
}

impl<R: Rng> RngTensionSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, cached: None }
    }
}

impl<R: Rng> TensionSource for RngTensionSource<R> {
    fn next_beta(&mut self, alpha: f64, beta: f64) -> Result<f64> {
        let dist = match self.cached.take() {
            Some((a, b, dist)) if a == alpha && b == beta => dist,
            _ => Beta::new(alpha, beta).map_err(|e| {
                EngineError::invalid(format!(
                    "Beta({alpha}, {beta}) is not a valid distribution: {e}"
                ))
            })?,
        };
        let value = below_one(dist.sample(&mut self.rng));
        self.cached = Some((alpha, beta, dist));
        Ok(value)
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
/// Ignores the requested shape parameters.
#[derive(Clone, Debug)]
pub struct FixedTensionSource {
    samples: Vec<f64>,
    cursor: usize,
}

impl FixedTensionSource {
    pub fn new(samples: impl Into<Vec<f64>>) -> Result<Self> {
        let samples = samples.into();
        if samples.is_empty() {
            return Err(EngineError::invalid("fixed tension source needs at least one sample"));
        }
        if let Some(bad) = samples.iter().find(|s| !(0.0..1.0).contains(*s)) {
            return Err(EngineError::invalid(format!(
                "fixed tension sample {bad} is outside [0, 1)"
            )));
        }
        Ok(Self { samples, cursor: 0 })
    }

    /// Number of samples handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl TensionSource for FixedTensionSource {
    fn next_beta(&mut self, _alpha: f64, _beta: f64) -> Result<f64> {
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        Ok(value)
    }
}
