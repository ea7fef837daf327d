//! In-memory scene corpus.
//!
//! The corpus is loaded once and never mutated. Loading is lenient: labels
//! are stored as found. Label queries are strict: every label a caller asks
//! for must be part of the vocabulary. Statistics sit on the lenient side
//! so they can describe data that would fail validation.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use rand::seq::index;
use scene_types::{Label, LabelError, LabelGroup, MatchMode};
use tracing::{debug, info};

use crate::document;
use crate::error::Result;
use crate::record::SceneRecord;
use crate::splits::{DatasetSplit, SplitRatios, rng_for, split_tokens};
use crate::summary::{self, CorpusSummary};

/// A `(token, record)` pair borrowed from a corpus.
pub type Scene<'a> = (&'a str, &'a SceneRecord);

/// Number of scenes drawn by [`SceneCorpus::sample`] when the caller has no
/// preference.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// The full scene corpus, held in document order.
///
/// # Example
///
/// ```
/// use scene_dataset::SceneCorpus;
/// use scene_types::MatchMode;
///
/// let corpus = SceneCorpus::from_json_str(r#"{
///     "a": {"labels": ["PED_CROSSING"], "description": "x"},
///     "b": {"labels": ["INTERSECTION", "TRAFFIC_LIGHT"], "description": "y"}
/// }"#).unwrap();
///
/// let crossing = corpus.scenes_by_label("PED_CROSSING").unwrap();
/// assert_eq!(crossing.len(), 1);
/// assert_eq!(crossing[0].0, "a");
///
/// let junctions = corpus
///     .scenes_by_labels(&["INTERSECTION", "TRAFFIC_LIGHT"], MatchMode::All)
///     .unwrap();
/// assert_eq!(junctions[0].0, "b");
///
/// assert!(corpus.scenes_by_label("NOT_A_LABEL").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneCorpus {
    tokens: Vec<String>,
    records: Vec<SceneRecord>,
    index: HashMap<String, usize>,
}

impl SceneCorpus {
    /// Builds a corpus from `(token, record)` pairs.
    ///
    /// A repeated token replaces the earlier record but keeps its original
    /// position, matching how a JSON object with duplicate keys is read.
    #[must_use]
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, SceneRecord)>,
        S: Into<String>,
    {
        let mut corpus = Self::default();
        for (token, record) in records {
            let token = token.into();
            if let Some(&pos) = corpus.index.get(&token) {
                corpus.records[pos] = record;
            } else {
                corpus.index.insert(token.clone(), corpus.tokens.len());
                corpus.tokens.push(token);
                corpus.records.push(record);
            }
        }
        corpus
    }

    /// Loads a corpus document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::NotFound`](crate::CorpusError::NotFound) if
    /// the file does not exist, and an IO or serialization error if it
    /// cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let corpus = Self::from_records(document::read_records(path)?);
        info!("Loaded {} scenes from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Parses a corpus document held in memory.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `json` is not a corpus document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_records(document::parse_records(json)?))
    }

    /// Reads a corpus document from any reader.
    ///
    /// # Errors
    ///
    /// Returns an IO or serialization error if the reader fails or does not
    /// yield a corpus document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_records(document::records_from_reader(reader)?))
    }

    /// Returns the number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the corpus holds no scenes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the scene tokens in document order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if `token` is in the corpus.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Looks up a scene by token.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&SceneRecord> {
        self.index.get(token).map(|&i| &self.records[i])
    }

    /// Returns the first scene in document order.
    #[must_use]
    pub fn first(&self) -> Option<Scene<'_>> {
        self.iter().next()
    }

    /// Iterates over all scenes in document order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Scene<'_>> + Clone + '_ {
        self.tokens
            .iter()
            .map(String::as_str)
            .zip(self.records.iter())
    }

    /// Iterates over all records in document order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &SceneRecord> + Clone + '_ {
        self.records.iter()
    }

    /// Returns every scene carrying `label`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidLabel`](crate::CorpusError::InvalidLabel)
    /// if `label` is not in the vocabulary.
    pub fn scenes_by_label(&self, label: &str) -> Result<Vec<Scene<'_>>> {
        let label = Label::parse_raw(label)?;
        Ok(self.with_label(label))
    }

    /// Returns every scene carrying `label`, in document order.
    #[must_use]
    pub fn with_label(&self, label: Label) -> Vec<Scene<'_>> {
        self.filter(|record| record.has_label(label))
    }

    /// Returns scenes matching `labels` under `mode`, in document order.
    ///
    /// `Any` keeps scenes sharing at least one label with `labels`; `All`
    /// keeps scenes carrying every label in `labels`. An empty `labels`
    /// therefore matches nothing under `Any` and everything under `All`.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidLabel`](crate::CorpusError::InvalidLabel)
    /// for the first element of `labels` outside the vocabulary.
    pub fn scenes_by_labels<S: AsRef<str>>(
        &self,
        labels: &[S],
        mode: MatchMode,
    ) -> Result<Vec<Scene<'_>>> {
        let wanted = Label::parse_all(labels)?;
        Ok(self.matching(&wanted, mode))
    }

    /// Returns scenes matching already-validated `labels` under `mode`.
    #[must_use]
    pub fn matching(&self, labels: &[Label], mode: MatchMode) -> Vec<Scene<'_>> {
        self.filter(|record| mode.accepts(&record.labels, labels))
    }

    /// Returns scenes carrying at least one dynamic label.
    #[must_use]
    pub fn dynamic_scenes(&self) -> Vec<Scene<'_>> {
        self.matching(LabelGroup::Dynamic.labels(), MatchMode::Any)
    }

    /// Returns scenes carrying at least one static label.
    #[must_use]
    pub fn static_scenes(&self) -> Vec<Scene<'_>> {
        self.matching(LabelGroup::Static.labels(), MatchMode::Any)
    }

    fn filter<F>(&self, mut keep: F) -> Vec<Scene<'_>>
    where
        F: FnMut(&SceneRecord) -> bool,
    {
        self.iter().filter(|(_, record)| keep(record)).collect()
    }

    /// Counts how many scenes carry each raw label string.
    #[must_use]
    pub fn label_occurrences(&self) -> BTreeMap<String, usize> {
        summary::label_occurrences(self.records())
    }

    /// Maps number of labels on a scene to number of scenes.
    #[must_use]
    pub fn label_count_histogram(&self) -> BTreeMap<usize, usize> {
        summary::label_count_histogram(self.records())
    }

    /// Computes the full corpus summary.
    #[must_use]
    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary::from_records(self.records())
    }

    /// Draws `min(n, len)` distinct scenes uniformly at random.
    ///
    /// Scenes come back in draw order. With `Some(seed)` the draw depends
    /// only on the seed, `n` and the token order.
    #[must_use]
    pub fn sample(&self, n: usize, seed: Option<u64>) -> Vec<Scene<'_>> {
        let amount = n.min(self.len());
        let mut rng = rng_for(seed);
        let drawn: Vec<Scene<'_>> = index::sample(&mut rng, self.len(), amount)
            .into_iter()
            .map(|i| (self.tokens[i].as_str(), &self.records[i]))
            .collect();
        debug!("sampled {} of {} scenes", drawn.len(), self.len());
        drawn
    }

    /// Splits all tokens into train/validation/test sets.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidRatio`](crate::CorpusError::InvalidRatio)
    /// if the ratios are rejected by [`SplitRatios::new`]. No partial split
    /// is produced.
    pub fn split(
        &self,
        train_ratio: f64,
        val_ratio: f64,
        test_ratio: f64,
        seed: Option<u64>,
    ) -> Result<DatasetSplit> {
        let ratios = SplitRatios::new(train_ratio, val_ratio, test_ratio)?;
        Ok(self.split_with(ratios, seed))
    }

    /// Splits all tokens using pre-validated ratios.
    #[must_use]
    pub fn split_with(&self, ratios: SplitRatios, seed: Option<u64>) -> DatasetSplit {
        split_tokens(&self.tokens, ratios, seed)
    }

    /// Checks every stored label against the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownInRecord`] for the first offending
    /// label, naming its scene.
    pub fn validate(&self) -> std::result::Result<(), LabelError> {
        for (token, record) in self.iter() {
            record.validate().map_err(|e| e.in_record(token))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SceneCorpus {
    type Item = Scene<'a>;
    type IntoIter = std::iter::Zip<
        std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>,
        std::slice::Iter<'a, SceneRecord>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_str: fn(&'a String) -> &'a str = String::as_str;
        self.tokens.iter().map(as_str).zip(self.records.iter())
    }
}
