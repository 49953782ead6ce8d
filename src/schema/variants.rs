//! Model variants and their feature schemas.
//!
//! Three artifacts ship with the screening tool:
//!
//! - [`ModelVariant::Linear`] - logistic model over 9 core clinical features,
//!   fit on standardized continuous inputs.
//! - [`ModelVariant::Ensemble`] - random-forest model over the 9 core
//!   features plus TCM medication history, fit on raw (unscaled) inputs.
//! - [`ModelVariant::LinearLegacy`] - an earlier 12-feature logistic model
//!   kept for longitudinal comparisons.
//!
//! Feature names are reproduced verbatim from the fitted models, including
//! `hight` and `zhongyaojizhongchengyao`. Renaming a column here would
//! silently misalign the vector against the artifact.

use serde::{Deserialize, Serialize};

use super::stats::{ScaleStats, StandardizationStats, StatsProvenance};

// =============================================================================
// Feature tables
// =============================================================================

const LINEAR_FEATURES: &[&str] = &[
    "chewing",
    "number_of_teeth",
    "choking",
    "eating",
    "age",
    "weight",
    "frail",
    "BMI",
    "MMSE",
];

const ENSEMBLE_FEATURES: &[&str] = &[
    "chewing",
    "number_of_teeth",
    "choking",
    "eating",
    "age",
    "weight",
    "frail",
    "BMI",
    "MMSE",
    "zhongyaojizhongchengyao",
];

const LINEAR_LEGACY_FEATURES: &[&str] = &[
    "chewing",
    "number_of_teeth",
    "choking",
    "eating",
    "age",
    "weight",
    "hight",
    "frail",
    "BMI",
    "MMSE",
    "education",
    "number_of_hospitalizations",
];

const fn cohort(mean: f32, std: f32) -> ScaleStats {
    ScaleStats {
        mean,
        std,
        provenance: StatsProvenance::Cohort,
    }
}

const fn estimated(mean: f32, std: f32) -> ScaleStats {
    ScaleStats {
        mean,
        std,
        provenance: StatsProvenance::Estimated,
    }
}

const LINEAR_STATS: StandardizationStats = StandardizationStats::from_entries(&[
    ("number_of_teeth", cohort(18.0, 9.299115)),
    ("weight", cohort(60.0, 9.572267)),
    ("BMI", cohort(23.0, 3.310996)),
    ("age", cohort(75.0, 7.154127)),
]);

// The legacy model was shipped before education and hospitalization counts
// were profiled on the cohort; those two pairs are estimates.
const LINEAR_LEGACY_STATS: StandardizationStats = StandardizationStats::from_entries(&[
    ("number_of_teeth", cohort(18.0, 9.299115)),
    ("weight", cohort(60.0, 9.572267)),
    ("BMI", cohort(23.0, 3.310996)),
    ("age", cohort(75.0, 7.154127)),
    ("hight", cohort(160.0, 7.683501)),
    ("education", estimated(9.0, 4.0)),
    ("number_of_hospitalizations", estimated(1.0, 1.2)),
]);

// =============================================================================
// VariantSchema
// =============================================================================

/// The full input contract for one model variant.
///
/// Carries the fitted feature order, the standardization table, and whether
/// inputs are standardized at all. The linear variants standardize; the
/// ensemble was trained on raw features and must never be standardized. That
/// asymmetry is a contract with the fitted artifacts, not a heuristic.
#[derive(Debug, Clone, Copy)]
pub struct VariantSchema {
    feature_names: &'static [&'static str],
    stats: StandardizationStats,
    standardize_inputs: bool,
}

impl VariantSchema {
    /// Ordered feature names, as fit.
    pub fn feature_names(&self) -> &'static [&'static str] {
        self.feature_names
    }

    /// Number of features the variant expects.
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Standardization stats for the variant's continuous features.
    pub fn scale_stats(&self) -> &StandardizationStats {
        &self.stats
    }

    /// Whether submissions for this variant are standardized before
    /// prediction.
    pub fn standardizes_inputs(&self) -> bool {
        self.standardize_inputs
    }

    /// Position of a feature name in the fitted order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| *f == name)
    }
}

static LINEAR_SCHEMA: VariantSchema = VariantSchema {
    feature_names: LINEAR_FEATURES,
    stats: LINEAR_STATS,
    standardize_inputs: true,
};

static ENSEMBLE_SCHEMA: VariantSchema = VariantSchema {
    feature_names: ENSEMBLE_FEATURES,
    stats: StandardizationStats::empty(),
    standardize_inputs: false,
};

static LINEAR_LEGACY_SCHEMA: VariantSchema = VariantSchema {
    feature_names: LINEAR_LEGACY_FEATURES,
    stats: LINEAR_LEGACY_STATS,
    standardize_inputs: true,
};

// =============================================================================
// ModelVariant
// =============================================================================

/// Identifier for one of the shipped pre-trained classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVariant {
    /// 9-feature logistic model (standardized inputs).
    Linear,
    /// 10-feature random-forest model (raw inputs).
    Ensemble,
    /// Legacy 12-feature logistic model (standardized inputs).
    LinearLegacy,
}

impl ModelVariant {
    /// All shipped variants.
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::Linear,
        ModelVariant::Ensemble,
        ModelVariant::LinearLegacy,
    ];

    /// Parse a variant identifier.
    pub fn from_identifier(identifier: &str) -> Result<Self, ConfigError> {
        match identifier {
            "linear" => Ok(Self::Linear),
            "ensemble" => Ok(Self::Ensemble),
            "linear-legacy" => Ok(Self::LinearLegacy),
            _ => Err(ConfigError::UnknownVariant {
                requested: identifier.to_string(),
            }),
        }
    }

    /// The canonical identifier string.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ensemble => "ensemble",
            Self::LinearLegacy => "linear-legacy",
        }
    }

    /// The variant's input contract.
    pub fn schema(&self) -> &'static VariantSchema {
        match self {
            Self::Linear => &LINEAR_SCHEMA,
            Self::Ensemble => &ENSEMBLE_SCHEMA,
            Self::LinearLegacy => &LINEAR_LEGACY_SCHEMA,
        }
    }

    /// Whether submissions for this variant are standardized.
    pub fn standardizes(&self) -> bool {
        self.schema().standardizes_inputs()
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

// =============================================================================
// ConfigError
// =============================================================================

/// Errors raised when resolving a schema variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested variant identifier is not registered.
    #[error(
        "unknown model variant {requested:?}; known variants: linear, ensemble, linear-legacy"
    )]
    UnknownVariant {
        /// The identifier as requested.
        requested: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_identifiers_round_trip() {
        for variant in ModelVariant::ALL {
            assert_eq!(
                ModelVariant::from_identifier(variant.identifier()).unwrap(),
                variant
            );
        }
    }

    #[test]
    fn unknown_identifier_is_config_error() {
        let err = ModelVariant::from_identifier("gradient-boost").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownVariant {
                requested: "gradient-boost".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.contains("gradient-boost"));
        assert!(message.contains("linear-legacy"));
    }

    #[test]
    fn linear_schema_shape() {
        let schema = ModelVariant::Linear.schema();
        assert_eq!(schema.n_features(), 9);
        assert_eq!(schema.feature_names()[0], "chewing");
        assert_eq!(schema.feature_names()[8], "MMSE");
        assert_eq!(schema.position("age"), Some(4));
        assert_eq!(schema.position("hight"), None);
        assert!(schema.standardizes_inputs());
        assert_eq!(schema.scale_stats().len(), 4);
    }

    #[test]
    fn ensemble_schema_has_no_continuous_stats() {
        let schema = ModelVariant::Ensemble.schema();
        assert_eq!(schema.n_features(), 10);
        assert_eq!(schema.feature_names()[9], "zhongyaojizhongchengyao");
        assert!(!schema.standardizes_inputs());
        assert!(schema.scale_stats().is_empty());
    }

    #[test]
    fn legacy_schema_keeps_verbatim_names() {
        let schema = ModelVariant::LinearLegacy.schema();
        assert_eq!(schema.n_features(), 12);
        // "hight" is the fitted column name; it must not be corrected.
        assert_eq!(schema.position("hight"), Some(6));
        assert_eq!(schema.position("height"), None);
    }

    #[test]
    fn legacy_estimated_stats_are_flagged() {
        let stats = ModelVariant::LinearLegacy.schema().scale_stats();
        assert_eq!(
            stats.get("education").unwrap().provenance,
            StatsProvenance::Estimated
        );
        assert_eq!(
            stats.get("number_of_hospitalizations").unwrap().provenance,
            StatsProvenance::Estimated
        );
        assert_eq!(
            stats.get("age").unwrap().provenance,
            StatsProvenance::Cohort
        );
    }

    #[test]
    fn all_stats_entries_name_schema_features_with_positive_std() {
        for variant in ModelVariant::ALL {
            let schema = variant.schema();
            for (name, stats) in schema.scale_stats().iter() {
                assert!(
                    schema.position(name).is_some(),
                    "{variant}: stats entry {name:?} is not a schema feature"
                );
                assert!(stats.std > 0.0, "{variant}: {name:?} has non-positive std");
            }
        }
    }
}
