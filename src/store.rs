//! Load-once model artifact cache.
//!
//! Artifacts are loaded lazily, once per variant, and the outcome (success
//! or failure) is cached for the process lifetime. A submission against a
//! variant whose artifact failed to load sees the same "model unavailable"
//! message every time; there is no retry until restart. The store is an
//! explicitly constructed value passed by reference to the submission
//! boundary, not an ambient singleton.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::bundle::{load_bundle, resolve_predictor};
use crate::predict::Predictor;
use crate::schema::ModelVariant;

// =============================================================================
// StoreConfig
// =============================================================================

/// Configuration for a [`ModelStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the artifact files.
    pub model_dir: PathBuf,
    /// Artifact file name for the linear variant.
    pub linear_file: String,
    /// Artifact file name for the ensemble variant.
    pub ensemble_file: String,
    /// Artifact file name for the legacy linear variant.
    pub linear_legacy_file: String,
    /// Accepted keyed-bundle labels, in priority order.
    pub bundle_keys: Vec<String>,
}

impl StoreConfig {
    /// Create a config with the shipped file names and default bundle keys.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            linear_file: "logistic_model.json".to_string(),
            ensemble_file: "random_forest_model.json".to_string(),
            linear_legacy_file: "logistic_model_legacy.json".to_string(),
            bundle_keys: crate::bundle::DEFAULT_BUNDLE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// The artifact file name for a variant.
    pub fn file_name(&self, variant: ModelVariant) -> &str {
        match variant {
            ModelVariant::Linear => &self.linear_file,
            ModelVariant::Ensemble => &self.ensemble_file,
            ModelVariant::LinearLegacy => &self.linear_legacy_file,
        }
    }

    /// The full artifact path for a variant.
    pub fn artifact_path(&self, variant: ModelVariant) -> PathBuf {
        self.model_dir.join(self.file_name(variant))
    }
}

// =============================================================================
// ModelUnavailable
// =============================================================================

/// A cached artifact-load failure.
///
/// Carries the reason recorded at first load; every later submission for the
/// variant gets the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model for variant '{variant}' unavailable ({}): {reason}", .path.display())]
pub struct ModelUnavailable {
    /// The variant whose artifact failed.
    pub variant: ModelVariant,
    /// The artifact path that was tried.
    pub path: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

impl ModelUnavailable {
    fn new(variant: ModelVariant, path: &Path, reason: String) -> Self {
        Self {
            variant,
            path: path.to_path_buf(),
            reason,
        }
    }
}

// =============================================================================
// ModelStore
// =============================================================================

#[derive(Debug, Clone)]
enum Slot {
    Ready(Arc<Predictor>),
    Unavailable(ModelUnavailable),
}

/// Lazy, load-once cache of resolved predictors.
#[derive(Debug)]
pub struct ModelStore {
    config: StoreConfig,
    slots: Mutex<HashMap<ModelVariant, Slot>>,
}

impl ModelStore {
    /// Create a store; nothing is loaded until first use.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the predictor for a variant, loading it on first use.
    ///
    /// Both outcomes are cached: a successful load is shared via `Arc`, a
    /// failure is replayed as the same [`ModelUnavailable`] until restart.
    pub fn predictor(&self, variant: ModelVariant) -> Result<Arc<Predictor>, ModelUnavailable> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(slot) = slots.get(&variant) {
            log::debug!("model cache hit for variant '{variant}'");
            return match slot {
                Slot::Ready(predictor) => Ok(Arc::clone(predictor)),
                Slot::Unavailable(err) => Err(err.clone()),
            };
        }

        let slot = self.load(variant);
        let result = match &slot {
            Slot::Ready(predictor) => Ok(Arc::clone(predictor)),
            Slot::Unavailable(err) => Err(err.clone()),
        };
        slots.insert(variant, slot);
        result
    }

    fn load(&self, variant: ModelVariant) -> Slot {
        let path = self.config.artifact_path(variant);
        let keys: Vec<&str> = self.config.bundle_keys.iter().map(String::as_str).collect();
        let outcome =
            load_bundle(&path).and_then(|bundle| resolve_predictor(bundle, &keys));
        match outcome {
            Ok(predictor) => {
                log::info!(
                    "loaded model for variant '{variant}' from {} ({} features)",
                    path.display(),
                    predictor.n_features()
                );
                Slot::Ready(Arc::new(predictor))
            }
            Err(err) => {
                log::warn!(
                    "model for variant '{variant}' unavailable ({}): {err}",
                    path.display()
                );
                Slot::Unavailable(ModelUnavailable::new(variant, &path, err.to_string()))
            }
        }
    }
}
