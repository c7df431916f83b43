use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::SPIRAL_Z_SCALE;
use crate::error::Result;
use crate::sieve::SieveTable;

/// Position of integer `n` on the square-root spiral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpiralPoint {
    pub n: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub is_prime: bool,
}

impl SpiralPoint {
    /// r = √n, θ = √n·π, z = n / 100.
    pub fn at(n: u64, is_prime: bool) -> Self {
        let r = (n as f64).sqrt();
        let theta = r * PI;
        Self {
            n,
            x: r * theta.cos(),
            y: r * theta.sin(),
            z: n as f64 / SPIRAL_Z_SCALE,
            is_prime,
        }
    }
}

/// Spiral coordinates for every `n` in `1..limit`, flagged by primality.
///
/// Primality comes from the same [`SieveTable`] the classifier uses, so
/// `n = 1` is never flagged prime.
pub fn spiral_points(limit: u64) -> Result<Vec<SpiralPoint>> {
    let sieve = SieveTable::generate(limit)?;
    Ok((1..limit)
        .map(|n| SpiralPoint::at(n, sieve.is_prime(n)))
        .collect())
}
