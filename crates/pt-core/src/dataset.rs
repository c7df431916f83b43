//! Data products handed to plotting collaborators, and their JSON bundle.
//!
//! Everything here is recomputed per call. The bundle is the only thing
//! that leaves the engine, and only as a string.

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify};
use crate::error::Result;
use crate::sieve::SieveTable;
use crate::source::TensionSource;
use crate::stability::{StabilityCurve, stability_curve};

pub const CURRENT_VERSION: &str = "0.1.0";

/// Sieve and classify everything below `limit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub limit: u64,
    #[serde(flatten)]
    pub classification: Classification,
}

impl Dataset {
    pub fn primes(&self) -> &[u64] {
        self.classification.primes()
    }

    pub fn orphans(&self) -> &[u64] {
        self.classification.orphans()
    }

    pub fn tensions(&self) -> &[f64] {
        self.classification.tensions()
    }

    /// Fraction of scanned primes that are orphans.
    pub fn orphan_share(&self) -> f64 {
        if self.primes().is_empty() {
            0.0
        } else {
            self.orphans().len() as f64 / self.primes().len() as f64
        }
    }
}

/// Build the sieve for `limit` and classify `[11, limit)`.
pub fn generate_data(limit: u64, source: &mut impl TensionSource) -> Result<Dataset> {
    let sieve = SieveTable::generate(limit)?;
    let classification = classify(&sieve, limit, source)?;
    Ok(Dataset {
        limit,
        classification,
    })
}

/// All data products of one run, versioned for export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub version: String,
    #[serde(rename = "maxCheckpoint")]
    pub max_checkpoint: u64,
    pub dataset: Dataset,
    pub stability: StabilityCurve,
}

impl Bundle {
    pub fn build(dataset: Dataset, max_checkpoint: u64) -> Result<Self> {
        let stability = stability_curve(dataset.orphans(), max_checkpoint)?;
        Ok(Self {
            version: CURRENT_VERSION.to_string(),
            max_checkpoint,
            dataset,
            stability,
        })
    }
}

pub fn export_json(bundle: &Bundle) -> Result<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

pub fn import_json(json: &str) -> Result<Bundle> {
    Ok(serde_json::from_str(json)?)
}
