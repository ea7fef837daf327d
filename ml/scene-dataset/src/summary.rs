//! Corpus summary and statistics.

use std::collections::BTreeMap;

use scene_types::{Label, LabelGroup};
use serde::{Deserialize, Serialize};

use crate::record::SceneRecord;

/// Counts, for each raw label string, how many records carry it.
///
/// Labels outside the vocabulary are counted as-is. A record listing the
/// same label twice contributes twice.
#[must_use]
pub fn label_occurrences<'a, I>(records: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a SceneRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        for label in &record.labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Maps "labels on a record" to "number of records with that many labels".
#[must_use]
pub fn label_count_histogram<'a, I>(records: I) -> BTreeMap<usize, usize>
where
    I: IntoIterator<Item = &'a SceneRecord>,
{
    let mut histogram = BTreeMap::new();
    for record in records {
        *histogram.entry(record.label_count()).or_insert(0) += 1;
    }
    histogram
}

/// Summary statistics for a scene corpus.
///
/// Statistics describe the raw data: unknown labels are counted, not
/// rejected.
///
/// # Example
///
/// ```
/// use scene_dataset::{CorpusSummary, SceneRecord};
///
/// let records = vec![
///     SceneRecord::new(["PED_CROSSING"], "x"),
///     SceneRecord::new(["INTERSECTION", "TRAFFIC_LIGHT"], "y"),
/// ];
///
/// let summary = CorpusSummary::from_records(&records);
/// assert_eq!(summary.total_scenes, 2);
/// assert_eq!(summary.total_labels, 3);
/// assert_eq!(summary.label_count_histogram.get(&2), Some(&1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Total number of scenes.
    pub total_scenes: usize,

    /// Total number of label entries across all scenes.
    pub total_labels: usize,

    /// Scenes carrying at least one dynamic label.
    pub dynamic_scenes: usize,

    /// Scenes carrying at least one static label.
    pub static_scenes: usize,

    /// Raw label string -> number of scenes carrying it.
    pub label_occurrences: BTreeMap<String, usize>,

    /// Labels per scene -> number of scenes.
    pub label_count_histogram: BTreeMap<usize, usize>,
}

impl CorpusSummary {
    /// Creates a summary from a sequence of records.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SceneRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();

        let mut summary = Self {
            label_occurrences: label_occurrences(records.clone()),
            label_count_histogram: label_count_histogram(records.clone()),
            ..Self::default()
        };

        for record in records {
            summary.total_scenes += 1;
            summary.total_labels += record.label_count();
            if record.in_group(LabelGroup::Dynamic) {
                summary.dynamic_scenes += 1;
            }
            if record.in_group(LabelGroup::Static) {
                summary.static_scenes += 1;
            }
        }

        summary
    }

    /// Returns true if the corpus is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_scenes == 0
    }

    /// Returns how many scenes carry `label`.
    #[must_use]
    pub fn occurrences(&self, label: Label) -> usize {
        self.label_occurrences
            .get(label.name())
            .copied()
            .unwrap_or(0)
    }

    /// Returns the raw labels found in the data that are not in the vocabulary.
    #[must_use]
    pub fn unknown_labels(&self) -> Vec<&str> {
        self.label_occurrences
            .keys()
            .filter(|raw| Label::parse_raw(raw).is_err())
            .map(String::as_str)
            .collect()
    }

    /// Returns `count` as a percentage of all scenes (0 for an empty corpus).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_scenes == 0 {
            0.0
        } else {
            count as f64 / self.total_scenes as f64 * 100.0
        }
    }

    /// Returns a human-readable summary string.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn to_report(&self) -> String {
        use std::fmt::Write;

        let rule = "=".repeat(60);
        let mut report = String::new();
        let _ = writeln!(report, "{rule}");
        let _ = writeln!(report, "nuScenes-SR Dataset Statistics");
        let _ = writeln!(report, "{rule}");
        let _ = writeln!(report, "Total scenes: {}", self.total_scenes);

        let _ = writeln!(report, "\nLabel occurrences:");
        for group in [LabelGroup::Dynamic, LabelGroup::Static] {
            let heading = match group {
                LabelGroup::Dynamic => "Dynamic Scenes",
                LabelGroup::Static => "Static Scenes",
            };
            let _ = writeln!(report, "\n{heading}:");
            for &label in group.labels() {
                let count = self.occurrences(label);
                let _ = writeln!(
                    report,
                    "  {label}: {count} ({:.1}%)",
                    self.percentage(count)
                );
            }
        }

        let _ = writeln!(report, "\nMulti-label distribution:");
        for (num_labels, &count) in &self.label_count_histogram {
            let _ = writeln!(
                report,
                "  {num_labels} labels: {count} scenes ({:.1}%)",
                self.percentage(count)
            );
        }

        let _ = writeln!(report, "{rule}");
        report
    }
}
