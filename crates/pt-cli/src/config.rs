use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pt_core::{
    DEFAULT_LIMIT, DEFAULT_MAX_CHECKPOINT, DEFAULT_SPIRAL_LIMIT, DEFAULT_TENSION_BINS,
    DEFAULT_TENSION_LIMIT,
};
use serde::Deserialize;

/// Run settings read from a TOML file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub limit: Option<u64>,
    pub max_checkpoint: Option<u64>,
    pub tension_limit: Option<u64>,
    pub spiral_limit: Option<u64>,
    pub bins: Option<usize>,
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid run config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `--config`, falling back to `PT_CONFIG`, else defaults.
    pub fn discover(flag: Option<&Path>) -> Result<Self> {
        let path = flag
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("PT_CONFIG").ok().map(PathBuf::from));
        match path {
            Some(p) => Self::load(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn limit(&self, flag: Option<u64>) -> u64 {
        flag.or(self.limit).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn max_checkpoint(&self, flag: Option<u64>) -> u64 {
        flag.or(self.max_checkpoint).unwrap_or(DEFAULT_MAX_CHECKPOINT)
    }

    pub fn tension_limit(&self, flag: Option<u64>) -> u64 {
        flag.or(self.tension_limit).unwrap_or(DEFAULT_TENSION_LIMIT)
    }

    pub fn spiral_limit(&self, flag: Option<u64>) -> u64 {
        flag.or(self.spiral_limit).unwrap_or(DEFAULT_SPIRAL_LIMIT)
    }

    pub fn bins(&self, flag: Option<usize>) -> usize {
        flag.or(self.bins).unwrap_or(DEFAULT_TENSION_BINS)
    }

    /// Seed from the flag, then the file, then `PT_SEED`.
    pub fn seed(&self, flag: Option<u64>) -> Result<Option<u64>> {
        if let Some(seed) = flag.or(self.seed) {
            return Ok(Some(seed));
        }
        match std::env::var("PT_SEED") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .with_context(|| format!("PT_SEED is not an unsigned integer: {raw:?}")),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RunConfig::parse("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.limit(None), DEFAULT_LIMIT);
        assert_eq!(config.bins(None), DEFAULT_TENSION_BINS);
    }

    #[test]
    fn test_file_values_and_flag_override() {
        let config = RunConfig::parse("limit = 5000\nmax_checkpoint = 20000\nseed = 7\n").unwrap();
        assert_eq!(config.limit(None), 5000);
        assert_eq!(config.limit(Some(900)), 900);
        assert_eq!(config.max_checkpoint(None), 20_000);
        assert_eq!(config.seed(None).unwrap(), Some(7));
        assert_eq!(config.seed(Some(1)).unwrap(), Some(1));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RunConfig::parse("limt = 5").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(RunConfig::parse("limit = \"big\"").is_err());
    }
}
