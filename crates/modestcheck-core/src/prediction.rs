//! Ranked label/probability pairs returned by the vision model.

use serde::{Deserialize, Serialize};

/// Number of ranked predictions requested from the model per image.
pub const TOP_K: usize = 5;

/// A single (label, probability) pair from the classifier.
///
/// Probabilities lie in [0, 1]; the model guarantees this, not us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }

    /// Human-readable detail line: `"sweatshirt (42.3%)"`.
    pub fn detail_line(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.probability * 100.0)
    }
}
