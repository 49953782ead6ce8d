//! Test support: deterministic model fixtures and assertion helpers.
//!
//! The fixtures mirror the shipped artifacts in shape (feature counts,
//! capability tags) with small hand-picked parameters, so unit and
//! integration tests can assert exact behavior without real model files.

use crate::bundle::{
    convert_payload, EnsemblePayload, LinearPayload, PipelinePayload, PredictorPayload,
    ScalerPayload, StepOpPayload, StepPayload, TreePayload,
};
use crate::features::RawRecord;
use crate::predict::Predictor;

/// Default tolerance for approximate slice comparisons.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Assert two f32 slices are element-wise equal within a tolerance.
///
/// # Panics
///
/// Panics with the first differing index when the slices disagree.
pub fn assert_slices_approx_eq(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "slice lengths differ: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        let close = (a.is_nan() && e.is_nan()) || (a - e).abs() <= tolerance;
        assert!(
            close,
            "slices differ at index {index}: actual {a}, expected {e} (tolerance {tolerance})"
        );
    }
}

// =============================================================================
// Payload fixtures
// =============================================================================

/// A calibrated 9-feature linear payload shaped like the shipped logistic
/// model.
pub fn linear_screening_payload() -> PredictorPayload {
    PredictorPayload::Linear(LinearPayload {
        weights: vec![0.9, -0.08, 1.1, 0.45, 0.6, -0.05, 0.7, 0.25, 0.8],
        intercept: vec![-1.5],
        calibrated: true,
    })
}

/// The same 9-feature linear model without a probability interface.
pub fn margin_only_screening_payload() -> PredictorPayload {
    PredictorPayload::Linear(LinearPayload {
        weights: vec![0.9, -0.08, 1.1, 0.45, 0.6, -0.05, 0.7, 0.25, 0.8],
        intercept: vec![-1.5],
        calibrated: false,
    })
}

/// A two-tree, 10-feature ensemble payload shaped like the shipped
/// random-forest model.
///
/// Tree 1 splits on TCM history (feature 9), tree 2 on chewing (feature 0).
pub fn ensemble_screening_payload() -> PredictorPayload {
    PredictorPayload::TreeEnsemble(EnsemblePayload {
        n_features: 10,
        trees: vec![
            TreePayload {
                split_indices: vec![9, 0, 0],
                thresholds: vec![0.5, 0.0, 0.0],
                children_left: vec![1, 0, 0],
                children_right: vec![2, 0, 0],
                default_left: vec![true, true, true],
                leaf_values: vec![0.0, 0.2, 0.8],
                gains: Some(vec![0.35, 0.0, 0.0]),
            },
            TreePayload {
                split_indices: vec![0, 0, 0],
                thresholds: vec![0.5, 0.0, 0.0],
                children_left: vec![1, 0, 0],
                children_right: vec![2, 0, 0],
                default_left: vec![true, true, true],
                leaf_values: vec![0.0, 0.3, 0.9],
                gains: Some(vec![0.15, 0.0, 0.0]),
            },
        ],
    })
}

/// A calibrated 12-feature linear payload shaped like the legacy model.
pub fn legacy_screening_payload() -> PredictorPayload {
    PredictorPayload::Linear(LinearPayload {
        weights: vec![
            0.85, -0.07, 1.0, 0.4, 0.55, -0.04, 0.02, 0.65, 0.22, 0.75, -0.06, 0.3,
        ],
        intercept: vec![-1.4],
        calibrated: true,
    })
}

/// A scaler-plus-estimator pipeline payload over 9 features.
///
/// The scaler is the identity (zero means, unit stds) so predictions match
/// [`linear_screening_payload`] exactly.
pub fn pipeline_screening_payload() -> PredictorPayload {
    let estimator = match linear_screening_payload() {
        PredictorPayload::Linear(linear) => linear,
        _ => unreachable!(),
    };
    PredictorPayload::Pipeline(PipelinePayload {
        steps: vec![
            StepPayload {
                name: "scaler".to_string(),
                op: StepOpPayload::Scaler(ScalerPayload {
                    means: vec![0.0; 9],
                    stds: vec![1.0; 9],
                }),
            },
            StepPayload {
                name: "clf".to_string(),
                op: StepOpPayload::Linear(estimator),
            },
        ],
    })
}

// =============================================================================
// Predictor fixtures
// =============================================================================

/// Resolved form of [`linear_screening_payload`].
pub fn linear_screening_predictor() -> Predictor {
    convert_payload(linear_screening_payload()).expect("fixture payload is valid")
}

/// Resolved form of [`margin_only_screening_payload`].
pub fn margin_only_screening_predictor() -> Predictor {
    convert_payload(margin_only_screening_payload()).expect("fixture payload is valid")
}

/// Resolved form of [`ensemble_screening_payload`].
pub fn ensemble_screening_predictor() -> Predictor {
    convert_payload(ensemble_screening_payload()).expect("fixture payload is valid")
}

/// Resolved form of [`legacy_screening_payload`].
pub fn legacy_screening_predictor() -> Predictor {
    convert_payload(legacy_screening_payload()).expect("fixture payload is valid")
}

// =============================================================================
// Record fixtures
// =============================================================================

/// A fully-populated low-risk linear submission (all continuous fields at
/// their cohort means or close to them).
pub fn low_risk_linear_record() -> RawRecord {
    RawRecord::new()
        .with("chewing", 0.0)
        .with("number_of_teeth", 20.0)
        .with("choking", 0.0)
        .with("eating", 0.0)
        .with("age", 75.0)
        .with("weight", 60.0)
        .with("frail", 0.0)
        .with("BMI", 23.4375)
        .with("MMSE", 0.0)
}

/// A fully-populated high-risk linear submission.
pub fn high_risk_linear_record() -> RawRecord {
    RawRecord::new()
        .with("chewing", 1.0)
        .with("number_of_teeth", 4.0)
        .with("choking", 1.0)
        .with("eating", 2.0)
        .with("age", 88.0)
        .with("weight", 45.0)
        .with("frail", 2.0)
        .with("BMI", 17.0)
        .with("MMSE", 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_convert_cleanly() {
        assert_eq!(linear_screening_predictor().n_features(), 9);
        assert_eq!(margin_only_screening_predictor().n_features(), 9);
        assert_eq!(ensemble_screening_predictor().n_features(), 10);
        assert_eq!(legacy_screening_predictor().n_features(), 12);
        assert_eq!(
            convert_payload(pipeline_screening_payload())
                .unwrap()
                .n_features(),
            9
        );
    }

    #[test]
    fn slice_assertion_accepts_nan_pairs() {
        assert_slices_approx_eq(&[1.0, f32::NAN], &[1.0, f32::NAN], DEFAULT_TOLERANCE);
    }

    #[test]
    #[should_panic(expected = "slices differ at index 1")]
    fn slice_assertion_reports_the_differing_index() {
        assert_slices_approx_eq(&[1.0, 2.0], &[1.0, 3.0], DEFAULT_TOLERANCE);
    }
}
