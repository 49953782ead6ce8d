//! End-to-end submission tests: assemble → standardize → predict → tier.

mod common;

use serde_json::json;
use tempfile::TempDir;

use dysrisk::features::{assemble, standardize};
use dysrisk::session;
use dysrisk::testing::{
    assert_slices_approx_eq, ensemble_screening_payload, high_risk_linear_record,
    linear_screening_payload, low_risk_linear_record, margin_only_screening_payload,
    DEFAULT_TOLERANCE,
};
use dysrisk::{
    ModelStore, ModelVariant, ProbabilityFidelity, RawRecord, RiskTier, StoreConfig,
    SubmissionError,
};

use common::write_artifact;

/// Store over a temp dir holding the linear, margin-only, and ensemble
/// fixture artifacts. The margin-only model is installed as the legacy file
/// so all three variants resolve.
fn fixture_store(dir: &TempDir) -> ModelStore {
    write_artifact(
        dir.path(),
        "logistic_model.json",
        &linear_screening_payload(),
    );
    write_artifact(
        dir.path(),
        "random_forest_model.json",
        &ensemble_screening_payload(),
    );
    write_artifact(
        dir.path(),
        "margin_only_model.json",
        &margin_only_screening_payload(),
    );

    let mut config = StoreConfig::new(dir.path());
    config.linear_legacy_file = "margin_only_model.json".to_string();
    ModelStore::new(config)
}

#[test]
fn linear_standardization_matches_the_cohort_constants() {
    let schema = ModelVariant::Linear.schema();
    let vector = standardize(assemble(&low_risk_linear_record(), schema), schema);

    // chewing, teeth, choking, eating, age, weight, frail, BMI, MMSE
    assert_slices_approx_eq(
        vector.as_slice(),
        &[0.0, 0.215074, 0.0, 0.0, 0.0, 0.0, 0.0, 0.132136, 0.0],
        DEFAULT_TOLERANCE,
    );
}

#[test]
fn low_risk_linear_submission() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    let assessment =
        session::evaluate(&store, ModelVariant::Linear, &low_risk_linear_record()).unwrap();

    assert_eq!(assessment.variant, ModelVariant::Linear);
    assert_eq!(assessment.prediction.label, 0);
    assert_eq!(assessment.prediction.fidelity, ProbabilityFidelity::Calibrated);
    // margin = -1.5 - 0.08 * 0.215074 + 0.25 * 0.132136 = -1.484172
    assert!((assessment.prediction.probability - 0.184798).abs() < 1e-4);
    assert_eq!(assessment.tier, RiskTier::Low);
}

#[test]
fn high_risk_linear_submission() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    let assessment =
        session::evaluate(&store, ModelVariant::Linear, &high_risk_linear_record()).unwrap();

    assert_eq!(assessment.prediction.label, 1);
    assert!(assessment.prediction.probability > 0.5);
    assert_eq!(assessment.tier, RiskTier::High);
}

#[test]
fn ensemble_submission_uses_raw_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    let record = low_risk_linear_record()
        .with("chewing", 1.0)
        .with("zhongyaojizhongchengyao", 1.0);
    let assessment = session::evaluate(&store, ModelVariant::Ensemble, &record).unwrap();

    // Tree 1 (TCM = 1) → 0.8, tree 2 (chewing = 1) → 0.9, mean 0.85.
    assert!((assessment.prediction.probability - 0.85).abs() < 1e-6);
    assert_eq!(assessment.tier, RiskTier::High);

    let record = low_risk_linear_record().with("zhongyaojizhongchengyao", 0.0);
    let assessment = session::evaluate(&store, ModelVariant::Ensemble, &record).unwrap();
    assert!((assessment.prediction.probability - 0.25).abs() < 1e-6);
    assert_eq!(assessment.tier, RiskTier::Low);
}

#[test]
fn ensemble_inputs_are_never_standardized() {
    // A tree splitting on raw age at 50: every real cohort age lands right.
    // If inputs were standardized, age 75 would become 0.0 and land left.
    let dir = tempfile::tempdir().unwrap();
    write_artifact(
        dir.path(),
        "random_forest_model.json",
        &json!({
            "type": "tree_ensemble",
            "n_features": 10,
            "trees": [{
                "split_indices": [4, 0, 0],
                "thresholds": [50.0, 0.0, 0.0],
                "children_left": [1, 0, 0],
                "children_right": [2, 0, 0],
                "leaf_values": [0.0, 0.1, 0.9]
            }]
        }),
    );
    let store = ModelStore::new(StoreConfig::new(dir.path()));

    let record = low_risk_linear_record().with("zhongyaojizhongchengyao", 0.0);
    let assessment = session::evaluate(&store, ModelVariant::Ensemble, &record).unwrap();
    assert!((assessment.prediction.probability - 0.9).abs() < 1e-6);
}

#[test]
fn ensemble_tolerates_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    // Empty record: every feature is the missing sentinel; both fixture
    // trees default left (0.2 and 0.3).
    let assessment =
        session::evaluate(&store, ModelVariant::Ensemble, &RawRecord::new()).unwrap();
    assert!((assessment.prediction.probability - 0.25).abs() < 1e-6);
    assert_eq!(assessment.tier, RiskTier::Low);
}

#[test]
fn linear_missing_fields_surface_as_analysis_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    // Linear models cannot route around missing values; the NaN margin is
    // caught and reported, not propagated as a bogus probability.
    let record = RawRecord::new().with("chewing", 0.0);
    let err = session::evaluate(&store, ModelVariant::Linear, &record).unwrap_err();
    assert!(matches!(err, SubmissionError::Predict(_)));
    assert!(err.to_string().contains("analysis error"));
}

#[test]
fn margin_only_model_falls_back_to_label_cast() {
    // Install the margin-only model as the linear artifact; predictions
    // degrade to cast labels and are flagged as such.
    let dir = tempfile::tempdir().unwrap();
    write_artifact(
        dir.path(),
        "logistic_model.json",
        &margin_only_screening_payload(),
    );
    let store_margin = ModelStore::new(StoreConfig::new(dir.path()));

    let low = session::evaluate(
        &store_margin,
        ModelVariant::Linear,
        &low_risk_linear_record(),
    )
    .unwrap();
    assert_eq!(low.prediction.fidelity, ProbabilityFidelity::LabelCast);
    assert_eq!(low.prediction.probability, 0.0);
    assert_eq!(low.tier, RiskTier::Low);

    let high = session::evaluate(
        &store_margin,
        ModelVariant::Linear,
        &high_risk_linear_record(),
    )
    .unwrap();
    assert_eq!(high.prediction.fidelity, ProbabilityFidelity::LabelCast);
    assert_eq!(high.prediction.probability, 1.0);
    assert_eq!(high.tier, RiskTier::High);
}

#[test]
fn feature_count_drift_reports_both_counts() {
    // Point the ensemble variant (10 features) at the 9-feature linear
    // artifact, simulating a schema/version drift.
    let dir = tempfile::tempdir().unwrap();
    write_artifact(
        dir.path(),
        "logistic_model.json",
        &linear_screening_payload(),
    );
    let mut config = StoreConfig::new(dir.path());
    config.ensemble_file = "logistic_model.json".to_string();
    let store = ModelStore::new(config);

    let record = low_risk_linear_record().with("zhongyaojizhongchengyao", 0.0);
    let err = session::evaluate(&store, ModelVariant::Ensemble, &record).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("expects 9"), "message was: {message}");
    assert!(message.contains("got 10"), "message was: {message}");
}

#[test]
fn explanation_is_available_per_variant() {
    let dir = tempfile::tempdir().unwrap();
    let store = fixture_store(&dir);

    let linear = session::explain(&store, ModelVariant::Linear).unwrap();
    assert_eq!(linear.len(), 9);

    let ensemble = session::explain(&store, ModelVariant::Ensemble).unwrap();
    assert_eq!(ensemble.len(), 10);
    assert!(ensemble.values().iter().all(|&v| v >= 0.0));
    let total: f32 = ensemble.values().iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}
