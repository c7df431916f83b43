use std::ops::Range;

use crate::error::{EngineError, Result};

/// Primality table for every integer in `0..=limit`.
///
/// Built once by the Sieve of Eratosthenes and never mutated afterwards.
/// Consumers borrow it; lookups outside the table report "not prime".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SieveTable {
    limit: u64,
    table: Box<[bool]>,
}

impl SieveTable {
    /// Sieve every integer up to and including `limit`.
    pub fn generate(limit: u64) -> Result<Self> {
        if limit < 2 {
            return Err(EngineError::invalid(format!(
                "sieve limit must be at least 2, got {limit}"
            )));
        }
        let size = usize::try_from(limit)
            .ok()
            .and_then(|l| l.checked_add(1))
            .ok_or_else(|| EngineError::invalid(format!("sieve limit {limit} exceeds memory")))?;

        let mut table = vec![true; size];
        table[0] = false;
        table[1] = false;

        let root = limit.isqrt() as usize;
        for i in 2..=root {
            if !table[i] {
                continue;
            }
            for multiple in (i * i..size).step_by(i) {
                table[multiple] = false;
            }
        }

        Ok(Self {
            limit,
            table: table.into_boxed_slice(),
        })
    }

    /// Largest integer covered by the table.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of entries (`limit + 1`).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Primality of `n`; false for anything outside the table.
    pub fn is_prime(&self, n: u64) -> bool {
        usize::try_from(n)
            .ok()
            .and_then(|i| self.table.get(i).copied())
            .unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.table
    }

    /// Ascending primes strictly below `limit`.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.primes_in(0..self.limit)
    }

    /// Ascending primes inside `range`, clipped to the table.
    pub fn primes_in(&self, range: Range<u64>) -> impl Iterator<Item = u64> + '_ {
        let end = range.end.min(self.table.len() as u64);
        (range.start..end).filter(move |&n| self.table[n as usize])
    }
}

/// Build the primality table for `0..=limit`.
pub fn generate_sieve(limit: u64) -> Result<SieveTable> {
    SieveTable::generate(limit)
}
