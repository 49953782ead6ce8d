//! On-disk artifact payload types.
//!
//! These are "foreign types" used only for (de)serialization; they are kept
//! separate from the runtime representations so the stored format can evolve
//! without touching inference code. Conversion plus validation lives in
//! [`convert`](super::convert).
//!
//! The exporter has emitted scalar-or-single-element-array numerics for some
//! fields across revisions, so those fields parse tolerantly via `OneOrMany`.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, OneOrMany};

fn default_calibrated() -> bool {
    true
}

/// A serialized predictor in any of the supported shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredictorPayload {
    /// Linear classifier parameters.
    Linear(LinearPayload),
    /// Tree-ensemble parameters.
    TreeEnsemble(EnsemblePayload),
    /// Scaler-plus-estimator pipeline.
    Pipeline(PipelinePayload),
}

/// Serialized linear classifier.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPayload {
    /// Signed coefficients, one per feature, in fitted order.
    pub weights: Vec<f64>,
    /// Intercept; tolerated as a scalar or a one-element array.
    #[serde_as(as = "OneOrMany<_>")]
    pub intercept: Vec<f64>,
    /// Whether the model carries a probability interface.
    #[serde(default = "default_calibrated")]
    pub calibrated: bool,
}

/// Serialized tree ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsemblePayload {
    /// Number of input features.
    pub n_features: usize,
    /// Trees in training order.
    pub trees: Vec<TreePayload>,
}

/// Serialized decision tree in flat parallel arrays (one entry per node;
/// node 0 is the root, child index 0 marks a leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePayload {
    /// Split feature index per node (ignored for leaves).
    pub split_indices: Vec<u32>,
    /// Split threshold per node (ignored for leaves).
    pub thresholds: Vec<f64>,
    /// Left child per node (0 = leaf).
    pub children_left: Vec<u32>,
    /// Right child per node (0 = leaf).
    pub children_right: Vec<u32>,
    /// Default direction for missing values; empty means all-left.
    #[serde(default)]
    pub default_left: Vec<bool>,
    /// Positive-class fraction per leaf node (ignored for internal nodes).
    pub leaf_values: Vec<f64>,
    /// Impurity gain per internal node; absent means no importance data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gains: Option<Vec<f64>>,
}

/// Serialized pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinePayload {
    /// Steps in application order; the last must be an estimator.
    pub steps: Vec<StepPayload>,
}

/// One named pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepPayload {
    /// Step name as exported (e.g. `"scaler"`, `"clf"`).
    pub name: String,
    /// The step operation.
    #[serde(flatten)]
    pub op: StepOpPayload,
}

/// A pipeline step operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepOpPayload {
    /// Standardization transform.
    Scaler(ScalerPayload),
    /// Linear estimator.
    Linear(LinearPayload),
    /// Tree-ensemble estimator.
    TreeEnsemble(EnsemblePayload),
}

/// Serialized scaler step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerPayload {
    /// Per-feature means.
    pub means: Vec<f64>,
    /// Per-feature standard deviations (all > 0).
    pub stds: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_payload_accepts_scalar_intercept() {
        let payload: PredictorPayload = serde_json::from_str(
            r#"{"type": "linear", "weights": [0.5, -0.25], "intercept": -1.5}"#,
        )
        .unwrap();
        match payload {
            PredictorPayload::Linear(linear) => {
                assert_eq!(linear.intercept, vec![-1.5]);
                assert!(linear.calibrated);
            }
            other => panic!("expected linear payload, got {other:?}"),
        }
    }

    #[test]
    fn linear_payload_accepts_array_intercept() {
        let payload: LinearPayload = serde_json::from_str(
            r#"{"weights": [0.5], "intercept": [0.25], "calibrated": false}"#,
        )
        .unwrap();
        assert_eq!(payload.intercept, vec![0.25]);
        assert!(!payload.calibrated);
    }

    #[test]
    fn step_payload_flattens_the_operation_tag() {
        let step: StepPayload = serde_json::from_str(
            r#"{"name": "scaler", "type": "scaler", "means": [0.0], "stds": [1.0]}"#,
        )
        .unwrap();
        assert_eq!(step.name, "scaler");
        assert!(matches!(step.op, StepOpPayload::Scaler(_)));
    }

    #[test]
    fn tree_payload_defaults() {
        let tree: TreePayload = serde_json::from_str(
            r#"{
                "split_indices": [0, 0, 0],
                "thresholds": [0.5, 0.0, 0.0],
                "children_left": [1, 0, 0],
                "children_right": [2, 0, 0],
                "leaf_values": [0.0, 0.2, 0.8]
            }"#,
        )
        .unwrap();
        assert!(tree.default_left.is_empty());
        assert!(tree.gains.is_none());
    }
}
