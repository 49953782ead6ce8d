//! The per-submission boundary.
//!
//! One call per form submission: assemble the record into the variant's
//! fitted order, standardize if (and only if) the variant's contract says
//! so, predict, and threshold. Every failure converts into a
//! [`SubmissionError`] whose `Display` is the user-visible message; nothing
//! here panics or crashes the process.

use crate::explain::{feature_importance, ExplainError, FeatureImportance};
use crate::features::{assemble, standardize, RawRecord};
use crate::predict::PredictError;
use crate::report::{classify_risk, RiskAssessment};
use crate::schema::{ConfigError, ModelVariant};
use crate::store::{ModelStore, ModelUnavailable};

/// A user-presentable submission failure.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The requested variant does not exist.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The variant's artifact failed to load (cached until restart).
    #[error("{0}")]
    ModelUnavailable(#[from] ModelUnavailable),

    /// The prediction itself failed.
    #[error("analysis error: {0}")]
    Predict(#[from] PredictError),

    /// Importance extraction failed.
    #[error("explanation error: {0}")]
    Explain(#[from] ExplainError),
}

/// Evaluate one form submission against a model variant.
pub fn evaluate(
    store: &ModelStore,
    variant: ModelVariant,
    record: &RawRecord,
) -> Result<RiskAssessment, SubmissionError> {
    let predictor = store.predictor(variant)?;
    let schema = variant.schema();

    let mut vector = assemble(record, schema);
    if variant.standardizes() {
        vector = standardize(vector, schema);
    }

    let prediction = predictor.predict(&vector)?;
    let tier = classify_risk(prediction.probability);
    log::debug!(
        "variant '{variant}': p={:.4} tier={tier:?}",
        prediction.probability
    );

    Ok(RiskAssessment {
        variant,
        prediction,
        tier,
    })
}

/// Resolve the feature-importance vector for a variant's model.
pub fn explain(
    store: &ModelStore,
    variant: ModelVariant,
) -> Result<FeatureImportance, SubmissionError> {
    let predictor = store.predictor(variant)?;
    Ok(feature_importance(&predictor)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    #[test]
    fn unavailable_model_surfaces_as_submission_error() {
        let store = ModelStore::new(StoreConfig::new("/nonexistent-model-dir"));
        let err = evaluate(&store, ModelVariant::Linear, &RawRecord::new()).unwrap_err();
        assert!(matches!(err, SubmissionError::ModelUnavailable(_)));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn config_error_message_passes_through() {
        let err = SubmissionError::from(ConfigError::UnknownVariant {
            requested: "foo".to_string(),
        });
        assert!(err.to_string().contains("unknown model variant"));
    }
}
