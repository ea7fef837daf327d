//! Scene record type.

use scene_types::{Label, LabelError, LabelGroup};
use serde::{Deserialize, Serialize};

/// One labelled scene as stored in the corpus document.
///
/// Labels are kept as the raw strings found in the document, in document
/// order. Loading never rejects a label; use [`SceneRecord::validate`] or
/// the label queries on [`SceneCorpus`](crate::SceneCorpus) when the
/// vocabulary must be enforced.
///
/// # Example
///
/// ```
/// use scene_dataset::SceneRecord;
/// use scene_types::Label;
///
/// let record = SceneRecord::new(["INTERSECTION", "TRAFFIC_LIGHT"], "busy junction");
///
/// assert_eq!(record.label_count(), 2);
/// assert!(record.has_label(Label::TrafficLight));
/// assert!(record.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Raw label strings, in document order.
    pub labels: Vec<String>,

    /// Free-text description of the scene.
    #[serde(default)]
    pub description: String,
}

impl SceneRecord {
    /// Creates a new scene record.
    #[must_use]
    pub fn new<I, S>(labels: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Creates a record from typed labels.
    #[must_use]
    pub fn from_labels(labels: &[Label], description: impl Into<String>) -> Self {
        Self::new(labels.iter().map(|label| label.name()), description)
    }

    /// Returns the number of labels on the record.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the record carries `label`.
    #[must_use]
    pub fn has_label(&self, label: Label) -> bool {
        self.labels.iter().any(|raw| label.matches(raw))
    }

    /// Returns `true` if the record carries any label from `group`.
    #[must_use]
    pub fn in_group(&self, group: LabelGroup) -> bool {
        group.labels().iter().any(|&label| self.has_label(label))
    }

    /// Returns the labels that belong to the vocabulary, skipping the rest.
    #[must_use]
    pub fn known_labels(&self) -> Vec<Label> {
        self.labels
            .iter()
            .filter_map(|raw| Label::parse_raw(raw).ok())
            .collect()
    }

    /// Checks every label against the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Unknown`] for the first label outside the
    /// vocabulary.
    pub fn validate(&self) -> Result<Vec<Label>, LabelError> {
        Label::parse_all(&self.labels)
    }
}
