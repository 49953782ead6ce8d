//! Feature importance extraction for the explanation chart.
//!
//! Linear models explain themselves through their signed coefficients; tree
//! ensembles through impurity-based importances. For pipeline artifacts the
//! importance comes from the fitted estimator inside: the step named
//! [`EXPLAIN_STEP_NAME`] when present, otherwise the final step.

use serde::Serialize;

use crate::predict::Predictor;
use crate::repr::{LinearClassifier, StepOp, TreeEnsemble};

/// Pipeline step name recognized as "the estimator" during explanation.
pub const EXPLAIN_STEP_NAME: &str = "clf";

/// What kind of importance vector a predictor yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceKind {
    /// Signed linear coefficients, one per feature.
    Linear,
    /// Non-negative impurity importances, normalized to sum to 1.
    Ensemble,
}

/// A per-feature importance vector in fitted schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    values: Vec<f32>,
    kind: ImportanceKind,
}

impl FeatureImportance {
    /// The importance values, aligned to the fitted feature order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Whether the values are signed coefficients or impurity importances.
    pub fn kind(&self) -> ImportanceKind {
        self.kind
    }

    /// Number of features covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature positions ordered by descending magnitude, for chart layout.
    pub fn ranked_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..self.values.len()).collect();
        positions.sort_by(|&a, &b| {
            self.values[b]
                .abs()
                .partial_cmp(&self.values[a].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        positions
    }
}

/// Errors raised while resolving an importance vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    /// The resolved pipeline step is a transform, not a fitted estimator.
    #[error("pipeline step {name:?} is not an estimator")]
    StepNotEstimator {
        /// Name of the resolved step.
        name: String,
    },

    /// The pipeline has no steps to resolve.
    #[error("pipeline has no steps")]
    EmptyPipeline,
}

/// Extract the importance vector for a resolved predictor.
pub fn feature_importance(predictor: &Predictor) -> Result<FeatureImportance, ExplainError> {
    match predictor {
        Predictor::Linear(model) => Ok(linear_importance(model)),
        Predictor::Ensemble(model) => Ok(ensemble_importance(model)),
        Predictor::Pipeline(pipeline) => {
            let step = pipeline
                .step_named(EXPLAIN_STEP_NAME)
                .or_else(|| pipeline.last_step())
                .ok_or(ExplainError::EmptyPipeline)?;
            match step.op() {
                StepOp::Linear(model) => Ok(linear_importance(model)),
                StepOp::Ensemble(model) => Ok(ensemble_importance(model)),
                StepOp::Scaler(_) => Err(ExplainError::StepNotEstimator {
                    name: step.name().to_string(),
                }),
            }
        }
    }
}

fn linear_importance(model: &LinearClassifier) -> FeatureImportance {
    FeatureImportance {
        values: model.coefficients().to_vec(),
        kind: ImportanceKind::Linear,
    }
}

fn ensemble_importance(model: &TreeEnsemble) -> FeatureImportance {
    FeatureImportance {
        values: model.impurity_importances(),
        kind: ImportanceKind::Ensemble,
    }
}
