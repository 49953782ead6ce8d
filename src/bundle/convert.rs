//! Payload-to-runtime conversion and validation.
//!
//! Artifacts are validated once, at load time, so inference never has to
//! defend against malformed trees or scalers. Child indices must point
//! strictly forward, which both keeps node 0 the unambiguous root and
//! guarantees traversal terminates.

use crate::repr::{
    Calibration, LinearClassifier, Pipeline, PipelineStep, Scaler, StepOp, Tree, TreeEnsemble,
};

use super::payload::{
    EnsemblePayload, LinearPayload, PipelinePayload, PredictorPayload, ScalerPayload,
    StepOpPayload, TreePayload,
};
use crate::predict::Predictor;

/// Errors raised while validating a deserialized artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Linear model with no coefficients.
    #[error("linear model has no weights")]
    EmptyWeights,

    /// Intercept arrays must hold exactly one value.
    #[error("linear model intercept must be a single value, got {count}")]
    BadIntercept {
        /// Number of intercept values found.
        count: usize,
    },

    /// A numeric parameter is NaN or infinite.
    #[error("non-finite value in {what}")]
    NonFinite {
        /// Which parameter group was malformed.
        what: &'static str,
    },

    /// Ensemble with no trees.
    #[error("ensemble model has no trees")]
    EmptyEnsemble,

    /// A tree's parallel arrays disagree in length.
    #[error("tree {tree}: node arrays have mismatched lengths")]
    TreeArrayMismatch {
        /// Index of the offending tree.
        tree: usize,
    },

    /// A child index is zero-or-backwards or past the node count.
    #[error("tree {tree}, node {node}: child index out of range")]
    ChildOutOfRange {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the offending node.
        node: usize,
    },

    /// A split refers to a feature the model does not have.
    #[error("tree {tree}, node {node}: split feature index out of range")]
    SplitIndexOutOfRange {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the offending node.
        node: usize,
    },

    /// A leaf value is outside `[0, 1]`.
    #[error("tree {tree}, node {node}: leaf value outside [0, 1]")]
    LeafValueOutOfRange {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the offending node.
        node: usize,
    },

    /// A gain entry is negative or non-finite.
    #[error("tree {tree}, node {node}: invalid gain")]
    InvalidGain {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the offending node.
        node: usize,
    },

    /// Scaler means and stds disagree in length.
    #[error("scaler means/stds have mismatched lengths ({means} vs {stds})")]
    ScalerArityMismatch {
        /// Number of means.
        means: usize,
        /// Number of stds.
        stds: usize,
    },

    /// A scaler std is zero, negative, or non-finite.
    #[error("scaler std at index {index} is not positive")]
    NonPositiveStd {
        /// Index of the offending std.
        index: usize,
    },

    /// Pipeline with no steps.
    #[error("pipeline has no steps")]
    EmptyPipeline,

    /// A fitted estimator appears before the final pipeline step.
    #[error("pipeline step {name:?} must be last: estimators cannot be followed by other steps")]
    EstimatorNotLast {
        /// Name of the offending step.
        name: String,
    },

    /// The final pipeline step is not an estimator.
    #[error("pipeline ends with step {name:?}, which is not an estimator")]
    NoFinalEstimator {
        /// Name of the final step.
        name: String,
    },

    /// A pipeline step expects a different feature count than its
    /// predecessors.
    #[error("pipeline step {name:?} expects {got} features, pipeline carries {expected}")]
    StepArityMismatch {
        /// Name of the offending step.
        name: String,
        /// Arity established by earlier steps.
        expected: usize,
        /// Arity of the offending step.
        got: usize,
    },
}

/// Convert a deserialized payload into a validated runtime predictor.
pub fn convert_payload(payload: PredictorPayload) -> Result<Predictor, ConvertError> {
    match payload {
        PredictorPayload::Linear(linear) => Ok(Predictor::Linear(convert_linear(linear)?)),
        PredictorPayload::TreeEnsemble(ensemble) => {
            Ok(Predictor::Ensemble(convert_ensemble(ensemble)?))
        }
        PredictorPayload::Pipeline(pipeline) => {
            Ok(Predictor::Pipeline(convert_pipeline(pipeline)?))
        }
    }
}

fn convert_linear(payload: LinearPayload) -> Result<LinearClassifier, ConvertError> {
    if payload.weights.is_empty() {
        return Err(ConvertError::EmptyWeights);
    }
    if payload.intercept.len() != 1 {
        return Err(ConvertError::BadIntercept {
            count: payload.intercept.len(),
        });
    }
    let intercept = payload.intercept[0];
    if !intercept.is_finite() || payload.weights.iter().any(|w| !w.is_finite()) {
        return Err(ConvertError::NonFinite {
            what: "linear weights",
        });
    }
    let weights = payload.weights.iter().map(|&w| w as f32).collect();
    let calibration = if payload.calibrated {
        Calibration::Logistic
    } else {
        Calibration::Uncalibrated
    };
    Ok(LinearClassifier::new(weights, intercept as f32, calibration))
}

fn convert_ensemble(payload: EnsemblePayload) -> Result<TreeEnsemble, ConvertError> {
    if payload.trees.is_empty() {
        return Err(ConvertError::EmptyEnsemble);
    }
    let n_features = payload.n_features;
    let trees = payload
        .trees
        .into_iter()
        .enumerate()
        .map(|(index, tree)| convert_tree(index, tree, n_features))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TreeEnsemble::new(trees, n_features))
}

fn convert_tree(
    tree_index: usize,
    payload: TreePayload,
    n_features: usize,
) -> Result<Tree, ConvertError> {
    let n = payload.split_indices.len();
    let mismatched = payload.thresholds.len() != n
        || payload.children_left.len() != n
        || payload.children_right.len() != n
        || payload.leaf_values.len() != n
        || !(payload.default_left.is_empty() || payload.default_left.len() == n);
    if n == 0 || mismatched {
        return Err(ConvertError::TreeArrayMismatch { tree: tree_index });
    }

    let default_left = if payload.default_left.is_empty() {
        vec![true; n]
    } else {
        payload.default_left
    };

    let gains = match payload.gains {
        None => vec![0.0f32; n],
        Some(gains) => {
            if gains.len() != n {
                return Err(ConvertError::TreeArrayMismatch { tree: tree_index });
            }
            for (node, &gain) in gains.iter().enumerate() {
                if !gain.is_finite() || gain < 0.0 {
                    return Err(ConvertError::InvalidGain {
                        tree: tree_index,
                        node,
                    });
                }
            }
            gains.iter().map(|&g| g as f32).collect()
        }
    };

    for node in 0..n {
        let left = payload.children_left[node] as usize;
        let right = payload.children_right[node] as usize;
        if left == 0 {
            // leaf: right must agree, leaf value must be a probability
            if right != 0 {
                return Err(ConvertError::ChildOutOfRange {
                    tree: tree_index,
                    node,
                });
            }
            let value = payload.leaf_values[node];
            if !(0.0..=1.0).contains(&value) {
                return Err(ConvertError::LeafValueOutOfRange {
                    tree: tree_index,
                    node,
                });
            }
        } else {
            // internal: children strictly forward, split within the model
            if left <= node || left >= n || right <= node || right >= n || right == 0 {
                return Err(ConvertError::ChildOutOfRange {
                    tree: tree_index,
                    node,
                });
            }
            if payload.split_indices[node] as usize >= n_features {
                return Err(ConvertError::SplitIndexOutOfRange {
                    tree: tree_index,
                    node,
                });
            }
            if !payload.thresholds[node].is_finite() {
                return Err(ConvertError::NonFinite {
                    what: "tree thresholds",
                });
            }
        }
    }

    Ok(Tree::from_arrays(
        payload.split_indices,
        payload.thresholds.iter().map(|&t| t as f32).collect(),
        payload.children_left,
        payload.children_right,
        default_left,
        payload.leaf_values.iter().map(|&v| v as f32).collect(),
        gains,
    ))
}

fn convert_scaler(payload: ScalerPayload) -> Result<Scaler, ConvertError> {
    if payload.means.len() != payload.stds.len() {
        return Err(ConvertError::ScalerArityMismatch {
            means: payload.means.len(),
            stds: payload.stds.len(),
        });
    }
    if payload.means.iter().any(|m| !m.is_finite()) {
        return Err(ConvertError::NonFinite {
            what: "scaler means",
        });
    }
    for (index, &std) in payload.stds.iter().enumerate() {
        if !std.is_finite() || std <= 0.0 {
            return Err(ConvertError::NonPositiveStd { index });
        }
    }
    Ok(Scaler::new(
        payload.means.iter().map(|&m| m as f32).collect(),
        payload.stds.iter().map(|&s| s as f32).collect(),
    ))
}

fn convert_pipeline(payload: PipelinePayload) -> Result<Pipeline, ConvertError> {
    if payload.steps.is_empty() {
        return Err(ConvertError::EmptyPipeline);
    }

    let last = payload.steps.len() - 1;
    let mut arity: Option<usize> = None;
    let mut steps = Vec::with_capacity(payload.steps.len());

    for (index, step) in payload.steps.into_iter().enumerate() {
        let name = step.name;
        let op = match step.op {
            StepOpPayload::Scaler(scaler) => StepOp::Scaler(convert_scaler(scaler)?),
            StepOpPayload::Linear(linear) => StepOp::Linear(convert_linear(linear)?),
            StepOpPayload::TreeEnsemble(ensemble) => {
                StepOp::Ensemble(convert_ensemble(ensemble)?)
            }
        };

        if op.is_estimator() && index != last {
            return Err(ConvertError::EstimatorNotLast { name });
        }
        if index == last && !op.is_estimator() {
            return Err(ConvertError::NoFinalEstimator { name });
        }

        let step_arity = op.n_features();
        match arity {
            None => arity = Some(step_arity),
            Some(expected) if expected != step_arity => {
                return Err(ConvertError::StepArityMismatch {
                    name,
                    expected,
                    got: step_arity,
                });
            }
            Some(_) => {}
        }

        steps.push(PipelineStep::new(name, op));
    }

    Ok(Pipeline::new(steps))
}
