use serde::{Deserialize, Serialize};

use crate::constants::{ORPHAN_TENSION, SCAN_START, TENSION_ALPHA, TENSION_BETA, TENSION_SCALE};
use crate::error::{EngineError, Result};
use crate::sieve::SieveTable;
use crate::source::TensionSource;

/// What the classifier decided for one prime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Lower member of a twin pair (`p + 2` prime within the limit).
    Skipped,
    /// `(p - 2) / 3` is prime. Carries tension 1/3.
    Orphan,
    /// `p - 2` is composite. Carries a scaled Beta sample.
    Tension(f64),
    /// `p - 2` is prime and the orphan test failed. Records nothing.
    Untracked,
}

impl Outcome {
    /// Tension entry this outcome contributes, if any.
    pub fn tension(self) -> Option<f64> {
        match self {
            Outcome::Orphan => Some(ORPHAN_TENSION),
            Outcome::Tension(t) => Some(t),
            Outcome::Skipped | Outcome::Untracked => None,
        }
    }
}

/// Primes of the scan range with their orphan and tension products.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    primes: Box<[u64]>,
    orphans: Box<[u64]>,
    tensions: Box<[f64]>,
}

impl Classification {
    /// Strictly increasing primes in `[11, limit)`.
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// Orphan primes, ascending.
    pub fn orphans(&self) -> &[u64] {
        &self.orphans
    }

    /// Tension values in scan order. Not index-aligned with `primes`.
    pub fn tensions(&self) -> &[f64] {
        &self.tensions
    }
}

/// Classify a single prime `p` against the sieve.
///
/// `p` must be prime and at least 11; the twin check only looks at `p + 2`
/// when it does not exceed `limit`.
pub fn classify_prime(
    sieve: &SieveTable,
    p: u64,
    limit: u64,
    source: &mut impl TensionSource,
) -> Result<Outcome> {
    if p < SCAN_START || !sieve.is_prime(p) {
        return Err(EngineError::invalid(format!(
            "{p} is not a prime in the scan range"
        )));
    }

    if p + 2 <= limit && sieve.is_prime(p + 2) {
        return Ok(Outcome::Skipped);
    }

    let target = p - 2;
    if target % 3 == 0 && sieve.is_prime(target / 3) {
        return Ok(Outcome::Orphan);
    }

    if !sieve.is_prime(target) {
        let sample = source.next_beta(TENSION_ALPHA, TENSION_BETA)?;
        return Ok(Outcome::Tension(sample * TENSION_SCALE));
    }

    Ok(Outcome::Untracked)
}

/// Scan `[11, limit)` and split its primes into orphan and tension products.
///
/// Only primes whose `p - 2` is composite draw from `source`.
pub fn classify(
    sieve: &SieveTable,
    limit: u64,
    source: &mut impl TensionSource,
) -> Result<Classification> {
    if limit < SCAN_START {
        return Err(EngineError::invalid(format!(
            "classification limit must be at least {SCAN_START}, got {limit}"
        )));
    }
    // the twin lookup reaches `limit` itself
    if sieve.limit() < limit {
        return Err(EngineError::invalid(format!(
            "sieve covers 0..={}, classification up to {limit} needs 0..={limit}",
            sieve.limit()
        )));
    }

    let mut primes = Vec::new();
    let mut orphans = Vec::new();
    let mut tensions = Vec::new();

    for p in sieve.primes_in(SCAN_START..limit) {
        primes.push(p);
        let outcome = classify_prime(sieve, p, limit, source)?;
        if outcome == Outcome::Orphan {
            orphans.push(p);
        }
        if let Some(t) = outcome.tension() {
            tensions.push(t);
        }
    }

    Ok(Classification {
        primes: primes.into_boxed_slice(),
        orphans: orphans.into_boxed_slice(),
        tensions: tensions.into_boxed_slice(),
    })
}
