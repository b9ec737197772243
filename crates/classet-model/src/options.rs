//! Configuration options for building a spec.

use serde::{Deserialize, Serialize};

/// What to do when a schema declares the same label more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateLabels {
    /// Keep the last declaration: its group and its position.
    #[default]
    LastWins,
    /// Fail spec construction with `ClassError::DuplicateLabel`.
    Reject,
}

/// Options controlling how a schema is turned into a spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecOptions {
    /// Handling of repeated schema labels.
    pub duplicate_labels: DuplicateLabels,
}

impl SpecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject ambiguous schemas.
    pub fn strict() -> Self {
        Self {
            duplicate_labels: DuplicateLabels::Reject,
        }
    }

    #[must_use]
    pub fn with_duplicate_labels(mut self, policy: DuplicateLabels) -> Self {
        self.duplicate_labels = policy;
        self
    }
}
