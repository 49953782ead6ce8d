//! Model artifact loading and bundle resolution.
//!
//! Artifacts arrive in one of two shapes: a bare predictor payload, or a
//! keyed container wrapping the payload under a label chosen by whichever
//! export script produced it. The recognized labels are an explicit,
//! ordered configuration (see [`DEFAULT_BUNDLE_KEYS`]), not guesses made at
//! the probe site; a container with none of them fails loudly, reporting the
//! keys it actually holds.
//!
//! # Example
//!
//! ```
//! use dysrisk::bundle::{parse_bundle, resolve_predictor, DEFAULT_BUNDLE_KEYS};
//!
//! let value = serde_json::json!({
//!     "model": {"type": "linear", "weights": [0.5, -0.25], "intercept": 0.1}
//! });
//! let bundle = parse_bundle(value).unwrap();
//! let predictor = resolve_predictor(bundle, DEFAULT_BUNDLE_KEYS).unwrap();
//! assert_eq!(predictor.n_features(), 2);
//! ```

mod convert;
mod payload;

pub use convert::{convert_payload, ConvertError};
pub use payload::{
    EnsemblePayload, LinearPayload, PipelinePayload, PredictorPayload, ScalerPayload,
    StepOpPayload, StepPayload, TreePayload,
};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::predict::Predictor;

/// Container labels accepted for keyed bundles, in resolution priority order.
pub const DEFAULT_BUNDLE_KEYS: &[&str] = &["pipeline", "model", "classifier", "estimator"];

// =============================================================================
// ModelBundle
// =============================================================================

/// A deserialized artifact, before predictor resolution.
#[derive(Debug, Clone)]
pub enum ModelBundle {
    /// The artifact is the predictor payload itself.
    Bare(PredictorPayload),
    /// The artifact wraps payloads under string labels.
    Keyed(serde_json::Map<String, Value>),
}

/// Errors raised while loading or resolving an artifact.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The artifact file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON, or a payload is malformed.
    #[error("malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact root is not a JSON object.
    #[error("model artifact root must be an object")]
    NotAnObject,

    /// A keyed container holds none of the accepted labels.
    #[error("no recognized predictor key in model bundle; available keys: {available:?}")]
    UnrecognizedKeys {
        /// The keys actually present, sorted.
        available: Vec<String>,
    },

    /// The payload failed validation.
    #[error("invalid model artifact: {0}")]
    Convert(#[from] ConvertError),
}

/// Classify a parsed JSON value as a bare payload or a keyed container.
///
/// An object carrying a `"type"` field is a bare payload; any other object is
/// treated as a keyed container. Non-objects are rejected.
pub fn parse_bundle(value: Value) -> Result<ModelBundle, BundleError> {
    match value {
        Value::Object(map) => {
            if map.contains_key("type") {
                let payload = serde_json::from_value(Value::Object(map))?;
                Ok(ModelBundle::Bare(payload))
            } else {
                Ok(ModelBundle::Keyed(map))
            }
        }
        _ => Err(BundleError::NotAnObject),
    }
}

/// Read and classify an artifact file.
pub fn load_bundle(path: &Path) -> Result<ModelBundle, BundleError> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    parse_bundle(value)
}

/// Resolve a bundle to a validated predictor.
///
/// Bare bundles convert directly. Keyed bundles are probed with `keys` in
/// order and the first present label wins; if none is present the error
/// reports the labels the container actually holds.
pub fn resolve_predictor(bundle: ModelBundle, keys: &[&str]) -> Result<Predictor, BundleError> {
    match bundle {
        ModelBundle::Bare(payload) => Ok(convert_payload(payload)?),
        ModelBundle::Keyed(mut map) => {
            for &key in keys {
                if let Some(value) = map.remove(key) {
                    let payload: PredictorPayload = serde_json::from_value(value)?;
                    return Ok(convert_payload(payload)?);
                }
            }
            let mut available: Vec<String> = map.keys().cloned().collect();
            available.sort();
            Err(BundleError::UnrecognizedKeys { available })
        }
    }
}
