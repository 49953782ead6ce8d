//! Prediction over resolved classifiers.
//!
//! [`Predictor`] is the typed form of a loaded artifact. Prediction checks
//! the feature count, dispatches on the classifier's capability tag, and
//! reports how the probability was obtained: calibrated models yield a real
//! probability, margin-only models fall back to casting the discrete label.
//! Callers must treat the cast fallback as lower fidelity.

use serde::Serialize;

use crate::features::FeatureVector;
use crate::repr::{Calibration, LinearClassifier, Pipeline, StepOp, TreeEnsemble};

// =============================================================================
// Prediction
// =============================================================================

/// How the reported probability was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityFidelity {
    /// A real probability from the model's probability interface.
    Calibrated,
    /// The discrete label cast to 0.0/1.0; the model exposes no probability
    /// interface.
    LabelCast,
}

/// The outcome of one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted class label (1 = positive / at risk).
    pub label: u8,
    /// Probability of the positive class.
    pub probability: f32,
    /// Fidelity of the probability field.
    pub fidelity: ProbabilityFidelity,
}

// =============================================================================
// PredictError
// =============================================================================

/// Errors raised while running a prediction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// The vector length does not match what the predictor was fit on.
    #[error("feature count mismatch: model expects {expected} features, got {got}")]
    FeatureMismatch {
        /// Features the fitted model expects.
        expected: usize,
        /// Features actually supplied.
        got: usize,
    },

    /// The ensemble holds no trees.
    #[error("ensemble model has no trees")]
    EmptyEnsemble,

    /// The model produced a non-finite score.
    #[error("prediction produced a non-finite value")]
    NonFiniteOutput,
}

// =============================================================================
// Predictor
// =============================================================================

/// A resolved, ready-to-run classifier.
#[derive(Debug, Clone)]
pub enum Predictor {
    /// Linear classifier (calibrated or margin-only).
    Linear(LinearClassifier),
    /// Soft-voting tree ensemble.
    Ensemble(TreeEnsemble),
    /// Scaler steps followed by an estimator.
    Pipeline(Pipeline),
}

impl Predictor {
    /// Number of features the predictor expects.
    pub fn n_features(&self) -> usize {
        match self {
            Predictor::Linear(model) => model.n_features(),
            Predictor::Ensemble(model) => model.n_features(),
            Predictor::Pipeline(pipeline) => pipeline.n_features(),
        }
    }

    /// Classify one assembled (and, per variant contract, standardized)
    /// feature vector.
    pub fn predict(&self, vector: &FeatureVector) -> Result<Prediction, PredictError> {
        let expected = self.n_features();
        let got = vector.len();
        if expected != got {
            return Err(PredictError::FeatureMismatch { expected, got });
        }

        match self {
            Predictor::Linear(model) => predict_linear(model, vector.as_slice()),
            Predictor::Ensemble(model) => predict_ensemble(model, vector.as_slice()),
            Predictor::Pipeline(pipeline) => predict_pipeline(pipeline, vector.as_slice()),
        }
    }
}

fn predict_linear(model: &LinearClassifier, features: &[f32]) -> Result<Prediction, PredictError> {
    let margin = model.margin(features);
    if !margin.is_finite() {
        return Err(PredictError::NonFiniteOutput);
    }
    let label = u8::from(margin > 0.0);
    match model.calibration() {
        Calibration::Logistic => Ok(Prediction {
            label,
            probability: sigmoid(margin),
            fidelity: ProbabilityFidelity::Calibrated,
        }),
        Calibration::Uncalibrated => Ok(Prediction {
            label,
            probability: f32::from(label),
            fidelity: ProbabilityFidelity::LabelCast,
        }),
    }
}

fn predict_ensemble(model: &TreeEnsemble, features: &[f32]) -> Result<Prediction, PredictError> {
    let probability = model
        .mean_leaf_value(features)
        .ok_or(PredictError::EmptyEnsemble)?;
    if !probability.is_finite() {
        return Err(PredictError::NonFiniteOutput);
    }
    Ok(Prediction {
        label: u8::from(probability > 0.5),
        probability,
        fidelity: ProbabilityFidelity::Calibrated,
    })
}

fn predict_pipeline(pipeline: &Pipeline, features: &[f32]) -> Result<Prediction, PredictError> {
    let mut buffer = features.to_vec();
    for step in pipeline.steps() {
        match step.op() {
            StepOp::Scaler(scaler) => scaler.apply(&mut buffer),
            StepOp::Linear(model) => return predict_linear(model, &buffer),
            StepOp::Ensemble(model) => return predict_ensemble(model, &buffer),
        }
    }
    // Conversion guarantees an estimator step; an all-scaler pipeline cannot
    // be constructed from an artifact.
    Err(PredictError::NonFiniteOutput)
}

/// Logistic function: `1 / (1 + exp(-x))`.
#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
