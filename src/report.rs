//! Risk tier classification.

use serde::Serialize;

use crate::predict::Prediction;
use crate::schema::ModelVariant;

/// Probability threshold separating the risk tiers.
///
/// Strictly greater than the threshold is high risk; exactly at the
/// threshold is low.
pub const RISK_THRESHOLD: f32 = 0.5;

/// Binary risk tier derived from the predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Probability above the threshold.
    High,
    /// Probability at or below the threshold.
    Low,
}

/// Classify a positive-class probability into a risk tier.
pub fn classify_risk(probability: f32) -> RiskTier {
    if probability > RISK_THRESHOLD {
        RiskTier::High
    } else {
        RiskTier::Low
    }
}

/// Everything the presentation layer needs to render one submission.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    /// The model variant that produced the assessment.
    pub variant: ModelVariant,
    /// The raw prediction (label, probability, fidelity).
    pub prediction: Prediction,
    /// The thresholded risk tier.
    pub tier: RiskTier,
}
