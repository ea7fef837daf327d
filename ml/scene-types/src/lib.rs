//! Scene label vocabulary for the nuScenes-SR corpus.
//!
//! This crate provides the closed set of scene-recognition labels and the
//! validation that maps raw label strings onto it:
//!
//! # Vocabulary
//!
//! - [`Label`] - One of the 10 scene categories
//! - [`LabelGroup`] - `Dynamic` (agent behaviour) or `Static` (environment)
//! - [`MatchMode`] - `Any` / `All` semantics for multi-label filters
//!
//! # Validation
//!
//! - [`LabelError`] - Raised when a string is not part of the vocabulary
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no I/O**. It can be used in:
//! - Dataset loaders
//! - Annotation tools
//! - Training pipelines that consume exported label files
//!
//! # Example
//!
//! ```
//! use scene_types::{Label, LabelGroup};
//!
//! let label: Label = "PED_CROSSING".parse().unwrap();
//! assert_eq!(label, Label::PedCrossing);
//! assert_eq!(label.group(), LabelGroup::Dynamic);
//!
//! assert!("NOT_A_LABEL".parse::<Label>().is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod label;
mod validation;

pub use label::{Label, LabelGroup, MatchMode};
pub use validation::LabelError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Label, LabelError, LabelGroup, MatchMode};
}
