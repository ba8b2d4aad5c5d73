//! Compliance scoring: a deterministic linear combination over model
//! predictions.
//!
//! Each prediction whose label contains a modest keyword adds its probability
//! to the score, each containing a non-modest keyword subtracts it. The sign
//! of the score decides the verdict; its magnitude (clamped) becomes the
//! confidence percentage.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::prediction::Prediction;

/// Binary attire-compliance verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Compliant,
    NotCompliant,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NotCompliant => "not compliant",
        }
    }
}

/// Result of assessing one image: verdict, confidence, and the raw
/// predictions the verdict was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    /// Percentage in [0, 100]: `min(|score| × 100, 100)`.
    pub confidence: f32,
    /// Raw signed score, before clamping.
    pub score: f32,
    /// The ranked predictions, in model order.
    pub predictions: Vec<Prediction>,
}

impl Assessment {
    /// Human-readable detail lines, one per prediction.
    pub fn detail_lines(&self) -> Vec<String> {
        self.predictions.iter().map(|p| p.detail_line()).collect()
    }
}

/// Compute the signed compliance score for a set of predictions.
///
/// A keyword hitting a label contributes the label's full probability once
/// per hit, so a label containing two non-modest keywords subtracts twice.
pub fn compliance_score(predictions: &[Prediction], lexicon: &Lexicon) -> f32 {
    let mut score = 0.0f32;
    for p in predictions {
        score += lexicon.modest_hits(&p.label) as f32 * p.probability;
        score -= lexicon.non_modest_hits(&p.label) as f32 * p.probability;
    }
    score
}

/// Score predictions and assemble the full [`Assessment`].
///
/// The verdict is `Compliant` iff the score is non-negative, so an image with
/// no keyword hits at all (score 0) is compliant with confidence 0.
pub fn assess(predictions: Vec<Prediction>, lexicon: &Lexicon) -> Assessment {
    let score = compliance_score(&predictions, lexicon);

    let verdict = if score >= 0.0 {
        Verdict::Compliant
    } else {
        Verdict::NotCompliant
    };

    let confidence = (score.abs() * 100.0).min(100.0);

    Assessment {
        verdict,
        confidence,
        score,
        predictions,
    }
}
