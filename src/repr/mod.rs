//! Runtime classifier representations.
//!
//! These are the typed forms the opaque on-disk artifacts resolve into:
//! a linear classifier (with or without probability calibration), a
//! soft-voting tree ensemble, and a scaler-plus-estimator pipeline.
//! Construction from artifact payloads, including validation, lives in
//! [`bundle`](crate::bundle).

mod forest;
mod linear;
mod pipeline;

pub use forest::{Tree, TreeEnsemble};
pub use linear::{Calibration, LinearClassifier};
pub use pipeline::{Pipeline, PipelineStep, Scaler, StepOp};
