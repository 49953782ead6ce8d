//! Reindexing raw records into fitted feature order.

use crate::schema::VariantSchema;

use super::record::RawRecord;
use super::vector::FeatureVector;

/// Assemble a raw record into a vector in the schema's fitted order.
///
/// For each schema feature name in order, the record is consulted; absent
/// fields become `f32::NAN`. No range validation happens here, the form layer
/// owns value constraints. The pairing of this function with the schema
/// registry is what keeps the n-th raw value from being fed as the wrong
/// column.
pub fn assemble(record: &RawRecord, schema: &VariantSchema) -> FeatureVector {
    let values = schema
        .feature_names()
        .iter()
        .map(|name| record.get(name).map(|v| v as f32).unwrap_or(f32::NAN))
        .collect();
    FeatureVector::from_values(values)
}
