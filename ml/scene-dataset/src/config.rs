//! Corpus configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::corpus::{DEFAULT_SAMPLE_SIZE, SceneCorpus};
use crate::error::{CorpusError, Result};
use crate::splits::SplitRatios;

/// Conventional location of the reviewed label file.
pub const DEFAULT_DATA_PATH: &str = "dataset/merged_final_labels_reviewed.json";

/// Environment variable overriding [`CorpusConfig::data_path`].
pub const DATA_PATH_ENV: &str = "SCENE_CORPUS_PATH";

/// Environment variable overriding [`CorpusConfig::seed`].
pub const SEED_ENV: &str = "SCENE_CORPUS_SEED";

/// Where to find the corpus and how to sample and split it.
///
/// # Example
///
/// ```
/// use scene_dataset::CorpusConfig;
///
/// let config = CorpusConfig::default().with_seed(42).with_sample_size(5);
/// assert_eq!(config.seed, Some(42));
/// assert_eq!(config.sample_size, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Path to the corpus document.
    pub data_path: PathBuf,

    /// Train/validation/test ratios.
    pub ratios: SplitRatios,

    /// Number of scenes drawn by a sample.
    pub sample_size: usize,

    /// Random seed for sampling and splitting (`None` = non-deterministic).
    pub seed: Option<u64>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            ratios: SplitRatios::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
        }
    }
}

impl CorpusConfig {
    /// Builds a config from defaults overridden by environment variables.
    ///
    /// Reads [`DATA_PATH_ENV`] and [`SEED_ENV`]. A seed that does not parse
    /// as `u64` is ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Self {
            data_path: lookup(DATA_PATH_ENV).map_or(default.data_path, PathBuf::from),
            seed: lookup(SEED_ENV)
                .and_then(|v| v.trim().parse().ok())
                .or(default.seed),
            ..default
        }
    }

    /// Sets the corpus document path.
    #[must_use]
    pub fn with_data_path(mut self, path: impl AsRef<Path>) -> Self {
        self.data_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the split ratios.
    #[must_use]
    pub fn with_ratios(mut self, ratios: SplitRatios) -> Self {
        self.ratios = ratios;
        self
    }

    /// Sets the sample size.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data path is empty. Ratios are checked when
    /// they are built or deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(CorpusError::validation("data_path cannot be empty"));
        }
        Ok(())
    }

    /// Loads the corpus at [`CorpusConfig::data_path`].
    ///
    /// # Errors
    ///
    /// See [`SceneCorpus::load`].
    pub fn load(&self) -> Result<SceneCorpus> {
        SceneCorpus::load(&self.data_path)
    }
}
