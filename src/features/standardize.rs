//! Standardization of continuous features.

use crate::schema::VariantSchema;

use super::vector::FeatureVector;

/// Standardize the continuous features of an assembled vector.
///
/// Every feature present in the schema's stats table becomes
/// `(x - mean) / std`; all other features pass through verbatim, missing
/// sentinels included. For variants with an empty stats table (the ensemble)
/// this is the identity.
///
/// Must be applied at most once per submission. Artifacts that embed their
/// own scaler step ship with an empty stats table so their inputs are not
/// standardized twice.
pub fn standardize(vector: FeatureVector, schema: &VariantSchema) -> FeatureVector {
    let stats = schema.scale_stats();
    if stats.is_empty() {
        return vector;
    }
    let values = schema
        .feature_names()
        .iter()
        .zip(vector.into_values())
        .map(|(name, x)| match stats.get(name) {
            Some(scale) => scale.apply(x),
            None => x,
        })
        .collect();
    FeatureVector::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{assemble, RawRecord};
    use crate::schema::ModelVariant;
    use approx::assert_abs_diff_eq;

    fn linear_record() -> RawRecord {
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

    #[test]
    fn continuous_features_are_rescaled() {
        let schema = ModelVariant::Linear.schema();
        let vector = standardize(assemble(&linear_record(), schema), schema);

        // age and weight sit exactly at their cohort means
        assert_abs_diff_eq!(vector.get(4).unwrap(), 0.0);
        assert_abs_diff_eq!(vector.get(5).unwrap(), 0.0);
        // teeth: (20 - 18) / 9.299115
        assert_abs_diff_eq!(vector.get(1).unwrap(), 0.215074, epsilon = 1e-5);
        // BMI: (23.4375 - 23) / 3.310996
        assert_abs_diff_eq!(vector.get(7).unwrap(), 0.132136, epsilon = 1e-5);
    }

    #[test]
    fn categorical_features_pass_through_unchanged() {
        let schema = ModelVariant::Linear.schema();
        let record = linear_record().with("eating", 2.0).with("MMSE", 3.0);
        let vector = standardize(assemble(&record, schema), schema);

        assert_eq!(vector.get(0), Some(0.0)); // chewing
        assert_eq!(vector.get(3), Some(2.0)); // eating
        assert_eq!(vector.get(8), Some(3.0)); // MMSE
    }

    #[test]
    fn mean_plus_std_maps_to_one() {
        let schema = ModelVariant::Linear.schema();
        let record = linear_record().with("age", 82.154127);
        let vector = standardize(assemble(&record, schema), schema);
        assert_abs_diff_eq!(vector.get(4).unwrap(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn missing_continuous_features_stay_missing() {
        let schema = ModelVariant::Linear.schema();
        let record = RawRecord::new().with("chewing", 1.0);
        let vector = standardize(assemble(&record, schema), schema);
        assert!(vector.is_missing(schema.position("age").unwrap()));
        assert_eq!(vector.get(0), Some(1.0));
    }

    #[test]
    fn ensemble_schema_is_a_no_op() {
        let schema = ModelVariant::Ensemble.schema();
        let record = linear_record().with("zhongyaojizhongchengyao", 1.0);
        let assembled = assemble(&record, schema);
        let standardized = standardize(assembled.clone(), schema);
        assert_eq!(standardized, assembled);
    }

    #[test]
    fn legacy_schema_scales_estimated_entries_too() {
        let schema = ModelVariant::LinearLegacy.schema();
        let record = RawRecord::new().with("education", 13.0).with("hight", 160.0);
        let vector = standardize(assemble(&record, schema), schema);
        // education: (13 - 9) / 4
        assert_abs_diff_eq!(
            vector.get(schema.position("education").unwrap()).unwrap(),
            1.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            vector.get(schema.position("hight").unwrap()).unwrap(),
            0.0
        );
    }
}
