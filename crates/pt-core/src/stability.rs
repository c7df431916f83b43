use serde::{Deserialize, Serialize};

use crate::constants::{CHECKPOINT_COUNT, MIN_CHECKPOINT, STABILITY_TARGET};
use crate::error::{EngineError, Result};

/// One checkpoint of the stability curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StabilityPoint {
    pub checkpoint: u64,
    /// Observed orphans at or below `checkpoint`.
    pub actual: usize,
    /// `checkpoint / ln(checkpoint)²`.
    pub predicted: f64,
    pub ratio: f64,
    /// `|ratio - 0.88|`
    pub absolute_error: f64,
}

/// Observed-to-predicted orphan density over evenly spaced checkpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilityCurve {
    points: Box<[StabilityPoint]>,
}

impl StabilityCurve {
    pub fn points(&self) -> &[StabilityPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn checkpoints(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|p| p.checkpoint)
    }

    pub fn ratios(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.ratio)
    }

    pub fn errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.absolute_error)
    }

    pub fn last(&self) -> Option<&StabilityPoint> {
        self.points.last()
    }

    pub fn mean_ratio(&self) -> f64 {
        mean(self.ratios(), self.len())
    }

    pub fn mean_absolute_error(&self) -> f64 {
        mean(self.errors(), self.len())
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Asymptotic orphan count model: `x / ln(x)²`.
pub fn predicted_count(checkpoint: u64) -> f64 {
    let x = checkpoint as f64;
    let ln = x.ln();
    x / (ln * ln)
}

/// Observed/predicted ratio, 0 when the model is not positive.
pub fn stability_ratio(actual: usize, predicted: f64) -> f64 {
    if predicted > 0.0 {
        actual as f64 / predicted
    } else {
        0.0
    }
}

/// `count` evenly spaced integer checkpoints from `start` to `stop` inclusive.
///
/// Computed as `start + i * step` and truncated, with the last point pinned
/// to `stop`.
pub fn checkpoints(start: u64, stop: u64, count: usize) -> Vec<u64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop as f64 - start as f64) / (count - 1) as f64;
            let mut out: Vec<u64> = (0..count)
                .map(|i| (start as f64 + i as f64 * step) as u64)
                .collect();
            out[count - 1] = stop;
            out
        }
    }
}

/// Compare orphan counts with `x / ln(x)²` at 500 checkpoints in
/// `[10000, max_checkpoint]`.
///
/// `orphans` must be ascending; each count is a binary search.
pub fn stability_curve(orphans: &[u64], max_checkpoint: u64) -> Result<StabilityCurve> {
    if max_checkpoint < MIN_CHECKPOINT {
        return Err(EngineError::invalid(format!(
            "max checkpoint must be at least {MIN_CHECKPOINT}, got {max_checkpoint}"
        )));
    }
    if !orphans.is_sorted() {
        return Err(EngineError::invalid("orphan sequence is not sorted ascending"));
    }

    let points = checkpoints(MIN_CHECKPOINT, max_checkpoint, CHECKPOINT_COUNT)
        .into_iter()
        .map(|checkpoint| {
            let actual = orphans.partition_point(|&o| o <= checkpoint);
            let predicted = predicted_count(checkpoint);
            let ratio = stability_ratio(actual, predicted);
            StabilityPoint {
                checkpoint,
                actual,
                predicted,
                ratio,
                absolute_error: (ratio - STABILITY_TARGET).abs(),
            }
        })
        .collect();

    Ok(StabilityCurve { points })
}
