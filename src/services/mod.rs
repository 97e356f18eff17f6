//! Service layer: the reconciliation pipeline and its pure building blocks.

pub mod age;
pub mod ownership;
pub mod reconciler;
pub mod status_classifier;

pub use age::age_in_days;
pub use ownership::resolve_groups;
pub use reconciler::{Reconciler, RunOutcome, RunSummary};
pub use status_classifier::{StatusClassifier, StatusVocabulary};
