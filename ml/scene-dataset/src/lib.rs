//! Scene corpus access for the nuScenes-SR dataset.
//!
//! This crate loads the scene-recognition label file into memory once and
//! answers queries over it:
//!
//! # Corpus
//!
//! - [`SceneCorpus`] - All scenes in document order, with label queries
//! - [`SceneRecord`] - Labels and description of one scene
//! - [`CorpusConfig`] - Data path, split ratios, sample size and seed
//!
//! # Sampling and Splitting
//!
//! - [`SceneCorpus::sample`] - Draw scenes without replacement
//! - [`split_tokens`] - Shuffle and cut tokens into train/val/test
//! - [`SplitRatios`] - Validated three-way ratios
//!
//! # Statistics and Export
//!
//! - [`CorpusSummary`] - Label occurrences and labels-per-scene histogram
//! - [`SceneCorpus::export_labels_only`] - Write token -> labels JSON
//!
//! # Validation Policy
//!
//! Loading accepts any label string. Queries that take labels from the
//! caller reject anything outside the vocabulary with
//! [`CorpusError::InvalidLabel`]. Statistics count what is in the data.
//! [`SceneCorpus::validate`] applies the strict check to the stored data
//! on demand.
//!
//! # Example
//!
//! ```
//! use scene_dataset::SceneCorpus;
//!
//! let corpus = SceneCorpus::from_json_str(r#"{
//!     "a": {"labels": ["PED_CROSSING"], "description": "x"},
//!     "b": {"labels": ["INTERSECTION", "TRAFFIC_LIGHT"], "description": "y"}
//! }"#).unwrap();
//!
//! let split = corpus.split(0.5, 0.5, 0.0, Some(1)).unwrap();
//! assert_eq!(split.sizes(), (1, 1, 0));
//!
//! let sample = corpus.sample(10, Some(42));
//! assert_eq!(sample.len(), 2);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod corpus;
mod document;
mod error;
mod record;
mod splits;
mod summary;

// Re-export corpus types
pub use corpus::{DEFAULT_SAMPLE_SIZE, Scene, SceneCorpus};
pub use record::SceneRecord;

// Re-export configuration
pub use config::{CorpusConfig, DATA_PATH_ENV, DEFAULT_DATA_PATH, SEED_ENV};

// Re-export split utilities
pub use splits::{DatasetSplit, RATIO_TOLERANCE, SplitRatios, split_tokens};

// Re-export statistics
pub use summary::{CorpusSummary, label_count_histogram, label_occurrences};

// Re-export document helpers
pub use document::{parse_records, read_labels, read_records, records_from_reader, write_document};

// Re-export error types
pub use error::{CorpusError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        CorpusConfig, CorpusError, CorpusSummary, DatasetSplit, Scene, SceneCorpus, SceneRecord,
        SplitRatios, split_tokens,
    };
    pub use scene_types::{Label, LabelGroup, MatchMode};
}
