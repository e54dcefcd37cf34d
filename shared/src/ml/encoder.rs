//! Label encoding between crop names and integer class indices

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from encoding or decoding labels
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncoderError {
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("class index {index} out of range for {classes} classes")]
    IndexOutOfRange { index: usize, classes: usize },
}

/// A fitted mapping between categorical labels and integer class indices.
///
/// The class list is sorted at fit time and never changes afterwards; a
/// label's position in `classes` is its class index everywhere in the
/// system, so the encoder artifact is the single source of truth for the
/// label/index correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit over a label column: sorted, de-duplicated class vocabulary
    pub fn fit(labels: &[String]) -> Self {
        let mut classes = labels.to_vec();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// The class vocabulary, in index order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Map a label to its class index
    pub fn transform(&self, label: &str) -> Result<usize, EncoderError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| EncoderError::UnknownLabel(label.to_string()))
    }

    /// Encode a whole label column
    pub fn transform_all(&self, labels: &[String]) -> Result<Vec<usize>, EncoderError> {
        labels.iter().map(|label| self.transform(label)).collect()
    }

    /// Map a class index back to its label
    pub fn inverse_transform(&self, index: usize) -> Result<&str, EncoderError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(EncoderError::IndexOutOfRange {
                index,
                classes: self.classes.len(),
            })
    }
}
