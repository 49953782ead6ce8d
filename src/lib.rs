//! dysrisk: dysphagia risk inference for clinical screening forms.
//!
//! This crate implements the inference core behind an elderly-dysphagia
//! screening form: raw clinical fields are assembled into the fixed-order
//! feature vector a pre-trained classifier was fit on, continuous features
//! are standardized where the model expects it, and the resulting probability
//! is thresholded into a binary risk tier.
//!
//! # Key Types
//!
//! - [`ModelVariant`] / [`VariantSchema`] - Feature order and scaling contract per model
//! - [`RawRecord`] / [`FeatureVector`] - Form input and its schema-aligned vector
//! - [`Predictor`] / [`Prediction`] - Loaded classifiers and their output
//! - [`ModelStore`] - Load-once artifact cache
//! - [`RiskAssessment`] - Probability plus risk tier for the presentation layer
//!
//! # Evaluating a Submission
//!
//! ```ignore
//! use dysrisk::{ModelStore, ModelVariant, RawRecord, StoreConfig};
//!
//! let store = ModelStore::new(StoreConfig::new("models"));
//! let record = RawRecord::new().with("age", 75.0).with("weight", 60.0);
//! let assessment = dysrisk::evaluate(&store, ModelVariant::Linear, &record)?;
//! println!("{:?} ({:.1}%)", assessment.tier, assessment.prediction.probability * 100.0);
//! ```

// Re-export approx traits for users who want to compare probabilities
pub use approx;

pub mod assets;
pub mod bundle;
pub mod explain;
pub mod features;
pub mod predict;
pub mod report;
pub mod repr;
pub mod schema;
pub mod session;
pub mod store;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Schema contract (feature order, standardization stats)
pub use schema::{ConfigError, ModelVariant, ScaleStats, StatsProvenance, VariantSchema};

// Form input handling
pub use features::{assemble, standardize, FeatureVector, RawRecord};

// Prediction types
pub use predict::{PredictError, Prediction, Predictor, ProbabilityFidelity};

// Explanation types
pub use explain::{feature_importance, ExplainError, FeatureImportance, ImportanceKind};

// Artifact loading
pub use bundle::{ModelBundle, DEFAULT_BUNDLE_KEYS};

// Store and submission boundary
pub use report::{classify_risk, RiskAssessment, RiskTier, RISK_THRESHOLD};
pub use session::{evaluate, SubmissionError};
pub use store::{ModelStore, ModelUnavailable, StoreConfig};
