//! Dataset splitting utilities.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CorpusError, Result};

/// Absolute tolerance on the sum of the three ratios.
pub const RATIO_TOLERANCE: f64 = 1e-6;

/// Ratios for splitting a corpus into train/validation/test sets.
///
/// # Example
///
/// ```
/// use scene_dataset::SplitRatios;
///
/// let ratios = SplitRatios::new(0.7, 0.15, 0.15).unwrap();
/// assert_eq!(ratios.boundaries(10), (7, 8));
///
/// assert!(SplitRatios::new(0.5, 0.3, 0.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSplitRatios")]
pub struct SplitRatios {
    train: f64,
    val: f64,
    test: f64,
}

/// Unchecked wire form of [`SplitRatios`].
#[derive(Deserialize)]
struct RawSplitRatios {
    train: f64,
    val: f64,
    test: f64,
}

impl TryFrom<RawSplitRatios> for SplitRatios {
    type Error = CorpusError;

    fn try_from(raw: RawSplitRatios) -> Result<Self> {
        Self::new(raw.train, raw.val, raw.test)
    }
}

impl SplitRatios {
    /// Creates split ratios.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidRatio`] if any ratio is negative or
    /// not finite, or if the ratios do not sum to 1.0 within
    /// [`RATIO_TOLERANCE`].
    pub fn new(train: f64, val: f64, test: f64) -> Result<Self> {
        let parts = [train, val, test];
        let in_range = parts.iter().all(|r| r.is_finite() && *r >= 0.0);
        let sum: f64 = parts.iter().sum();

        if !in_range || (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(CorpusError::invalid_ratio(train, val, test));
        }

        Ok(Self { train, val, test })
    }

    /// Returns the training ratio.
    #[must_use]
    pub const fn train_ratio(&self) -> f64 {
        self.train
    }

    /// Returns the validation ratio.
    #[must_use]
    pub const fn val_ratio(&self) -> f64 {
        self.val
    }

    /// Returns the test ratio.
    #[must_use]
    pub const fn test_ratio(&self) -> f64 {
        self.test
    }

    /// Computes `(train_end, val_end)` for a dataset of `total` items.
    ///
    /// Both shares are truncated independently; whatever is left after
    /// `val_end` becomes the test set, so test absorbs the rounding loss.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn boundaries(&self, total: usize) -> (usize, usize) {
        let total_f = total as f64;
        let train_end = ((total_f * self.train) as usize).min(total);
        let val_end = (train_end + (total_f * self.val) as usize).min(total);
        (train_end, val_end)
    }

    /// Common 80/10/10 split.
    pub const EIGHTY_TEN_TEN: Self = Self {
        train: 0.8,
        val: 0.1,
        test: 0.1,
    };

    /// Common 70/15/15 split.
    pub const SEVENTY_FIFTEEN_FIFTEEN: Self = Self {
        train: 0.7,
        val: 0.15,
        test: 0.15,
    };
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::EIGHTY_TEN_TEN
    }
}

/// Result of a three-way split: disjoint token lists covering the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSplit {
    /// Training tokens.
    pub train: Vec<String>,

    /// Validation tokens.
    pub val: Vec<String>,

    /// Test tokens.
    pub test: Vec<String>,
}

impl DatasetSplit {
    /// Returns `(train, val, test)` sizes.
    #[must_use]
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.len(), self.val.len(), self.test.len())
    }

    /// Returns the total number of tokens across the three sets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    /// Consumes the split, returning `(train, val, test)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, Vec<String>) {
        (self.train, self.val, self.test)
    }
}

/// Builds the random source for a seeded or unseeded draw.
pub(crate) fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

/// Shuffles `tokens` and cuts them into train/validation/test sets.
///
/// With `Some(seed)` the result depends only on the seed, the ratios and
/// the input order. With `None` the shuffle is seeded from OS entropy.
///
/// # Example
///
/// ```
/// use scene_dataset::{SplitRatios, split_tokens};
///
/// let tokens: Vec<String> = (0..10).map(|i| format!("scene-{i}")).collect();
/// let split = split_tokens(&tokens, SplitRatios::default(), Some(42));
///
/// assert_eq!(split.sizes(), (8, 1, 1));
/// assert_eq!(split, split_tokens(&tokens, SplitRatios::default(), Some(42)));
/// ```
#[must_use]
pub fn split_tokens<S: AsRef<str>>(
    tokens: &[S],
    ratios: SplitRatios,
    seed: Option<u64>,
) -> DatasetSplit {
    let mut shuffled: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();

    let mut rng = rng_for(seed);
    shuffled.shuffle(&mut rng);

    let (train_end, val_end) = ratios.boundaries(shuffled.len());
    let test = shuffled.split_off(val_end);
    let val = shuffled.split_off(train_end);
    let train = shuffled;

    debug!(
        "split {} tokens into train={} val={} test={}",
        tokens.len(),
        train.len(),
        val.len(),
        test.len()
    );

    DatasetSplit { train, val, test }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("scene-{i:04}")).collect()
    }

    #[test]
    fn split_ratios_new() {
        let ratios = SplitRatios::new(0.7, 0.2, 0.1);
        assert!(ratios.is_ok());
        let ratios = ratios.unwrap_or_default();
        assert!((ratios.train_ratio() - 0.7).abs() < 1e-9);
        assert!((ratios.val_ratio() - 0.2).abs() < 1e-9);
        assert!((ratios.test_ratio() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn split_ratios_reject_bad_sum() {
        let err = SplitRatios::new(0.5, 0.3, 0.3);
        assert!(matches!(err, Err(CorpusError::InvalidRatio { .. })));
        assert!(SplitRatios::new(0.5, 0.3, 0.1).is_err());
    }

    #[test]
    fn split_ratios_tolerance() {
        assert!(SplitRatios::new(0.8, 0.1, 0.100_000_5).is_ok());
        assert!(SplitRatios::new(0.8, 0.1, 0.100_01).is_err());
    }

    #[test]
    fn split_ratios_reject_negative_and_nan() {
        assert!(SplitRatios::new(1.2, -0.2, 0.0).is_err());
        assert!(SplitRatios::new(f64::NAN, 0.5, 0.5).is_err());
        assert!(SplitRatios::new(f64::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn split_ratios_allow_zero_parts() {
        assert!(SplitRatios::new(0.5, 0.5, 0.0).is_ok());
        assert!(SplitRatios::new(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn split_ratios_boundaries_truncate() {
        let ratios = SplitRatios::SEVENTY_FIFTEEN_FIFTEEN;
        // 0.7 * 11 = 7.7 -> 7, 0.15 * 11 = 1.65 -> 1
        assert_eq!(ratios.boundaries(11), (7, 8));
        assert_eq!(ratios.boundaries(0), (0, 0));

        let halves = SplitRatios::new(0.5, 0.5, 0.0).unwrap_or_default();
        assert_eq!(halves.boundaries(2), (1, 2));
        assert_eq!(halves.boundaries(3), (1, 2));
    }

    #[test]
    fn split_ratios_default() {
        assert_eq!(SplitRatios::default(), SplitRatios::EIGHTY_TEN_TEN);
    }

    #[test]
    fn split_ratios_serialization() {
        let json = serde_json::to_string(&SplitRatios::default()).unwrap_or_default();
        let parsed: std::result::Result<SplitRatios, _> = serde_json::from_str(&json);
        assert_eq!(parsed.ok(), Some(SplitRatios::default()));
    }

    #[test]
    fn split_ratios_deserialize_rejects_bad_ratios() {
        let parsed: std::result::Result<SplitRatios, _> =
            serde_json::from_str(r#"{"train": 1.5, "val": -0.5, "test": 0.0}"#);
        let err = parsed.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("invalid split ratios"));

        let parsed: std::result::Result<SplitRatios, _> =
            serde_json::from_str(r#"{"train": 0.5, "val": 0.3, "test": 0.3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn split_tokens_partitions_input() {
        let input = tokens(23);
        let split = split_tokens(&input, SplitRatios::default(), Some(7));

        assert_eq!(split.total(), 23);
        // floor(18.4) = 18, floor(2.3) = 2, remainder 3
        assert_eq!(split.sizes(), (18, 2, 3));

        let mut all: Vec<String> = split
            .train
            .iter()
            .chain(&split.val)
            .chain(&split.test)
            .cloned()
            .collect();
        all.sort();
        assert_eq!(all, input);
    }

    #[test]
    fn split_tokens_reproducible() {
        let input = tokens(100);
        let a = split_tokens(&input, SplitRatios::default(), Some(42));
        let b = split_tokens(&input, SplitRatios::default(), Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn split_tokens_seed_changes_order() {
        let input = tokens(100);
        let a = split_tokens(&input, SplitRatios::default(), Some(1));
        let b = split_tokens(&input, SplitRatios::default(), Some(2));
        assert_ne!(a, b);
    }

    #[test]
    fn split_tokens_unseeded_keeps_sizes() {
        let input = tokens(10);
        let split = split_tokens(&input, SplitRatios::default(), None);
        assert_eq!(split.sizes(), (8, 1, 1));
    }

    #[test]
    fn split_tokens_empty() {
        let input: Vec<String> = Vec::new();
        let split = split_tokens(&input, SplitRatios::default(), Some(1));
        assert_eq!(split.sizes(), (0, 0, 0));
    }

    #[test]
    fn split_tokens_into_parts() {
        let input = tokens(4);
        let (train, val, test) =
            split_tokens(&input, SplitRatios::new(0.5, 0.25, 0.25).unwrap_or_default(), Some(3))
                .into_parts();
        assert_eq!((train.len(), val.len(), test.len()), (2, 1, 1));
    }
}
