use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Equal-width histogram over the data range.
///
/// `edges` has `bins + 1` entries. Every bin is half-open except the last,
/// which also holds values equal to the upper edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(EngineError::invalid("histogram needs at least one bin"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::invalid(format!(
                "histogram value {bad} is not finite"
            )));
        }

        let (lo, hi) = value_range(values);
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0; bins];
        for &v in values {
            let idx = ((v - lo) / width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Index of the bin containing `value`, if it falls inside the range.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let lo = *self.edges.first()?;
        let hi = *self.edges.last()?;
        if !(lo..=hi).contains(&value) {
            return None;
        }
        let width = (hi - lo) / self.bins() as f64;
        Some((((value - lo) / width) as usize).min(self.bins() - 1))
    }
}

fn value_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_len() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37) % 1.0).collect();
        let h = Histogram::from_values(&values, 30).unwrap();
        assert_eq!(h.bins(), 30);
        assert_eq!(h.edges().len(), 31);
        assert_eq!(h.total(), 1000);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let h = Histogram::from_values(&[0.0, 0.5, 1.0], 4).unwrap();
        assert_eq!(h.counts(), &[1, 0, 1, 1]);
    }

    #[test]
    fn test_edges_span_data() {
        let h = Histogram::from_values(&[0.1, 0.3], 2).unwrap();
        assert_eq!(h.edges().first(), Some(&0.1));
        assert_eq!(h.edges().last(), Some(&0.3));
    }

    #[test]
    fn test_empty_input_spans_unit_interval() {
        let h = Histogram::from_values(&[], 10).unwrap();
        assert_eq!(h.total(), 0);
        assert_eq!(h.edges()[0], 0.0);
        assert_eq!(h.edges()[10], 1.0);
    }

    #[test]
    fn test_single_value_range() {
        let third = 1.0 / 3.0;
        let h = Histogram::from_values(&[third, third], 3).unwrap();
        assert_eq!(h.edges()[0], third - 0.5);
        assert_eq!(h.counts(), &[0, 2, 0]);
    }

    #[test]
    fn test_bin_of() {
        let h = Histogram::from_values(&[0.0, 1.0], 4).unwrap();
        assert_eq!(h.bin_of(0.1), Some(0));
        assert_eq!(h.bin_of(1.0), Some(3));
        assert_eq!(h.bin_of(1.5), None);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Histogram::from_values(&[0.1], 0).is_err());
        assert!(Histogram::from_values(&[f64::NAN], 5).is_err());
    }
}
