//! Feature schema registry.
//!
//! Each pre-trained model variant carries a fixed, ordered feature schema and
//! a table of standardization statistics for its continuous features. The
//! schemas here must match the column order the corresponding artifact was
//! fit on; the registry is the single place that order lives.
//!
//! # Example
//!
//! ```
//! use dysrisk::schema::ModelVariant;
//!
//! let schema = ModelVariant::Linear.schema();
//! assert_eq!(schema.n_features(), 9);
//! assert_eq!(schema.feature_names()[4], "age");
//! ```

mod stats;
mod variants;

pub use stats::{ScaleStats, StandardizationStats, StatsProvenance};
pub use variants::{ConfigError, ModelVariant, VariantSchema};
