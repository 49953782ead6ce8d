//! Static explanatory chart assets.
//!
//! The evaluation charts (confusion matrix, ROC comparison, metrics
//! comparison) are produced offline and shipped as PNGs next to the model
//! artifacts. Absence is a deliberate degrade, not an error: lookups return
//! `None` and the presentation layer shows its placeholder.

use std::path::{Path, PathBuf};

use crate::schema::ModelVariant;

/// The static images the presentation layer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Test-set confusion matrix for a variant's model family.
    ConfusionMatrix(ModelVariant),
    /// ROC comparison across the shipped models.
    RocComparison,
    /// Side-by-side metrics comparison.
    MetricsComparison,
    /// Page banner.
    Banner,
    /// Sidebar logo.
    Logo,
}

impl ChartKind {
    /// File name of the asset, as exported by the offline evaluation run.
    pub fn file_name(&self) -> &'static str {
        match self {
            // Both linear variants share the logistic-family chart.
            ChartKind::ConfusionMatrix(ModelVariant::Linear)
            | ChartKind::ConfusionMatrix(ModelVariant::LinearLegacy) => "Test_CM_Logistic.png",
            ChartKind::ConfusionMatrix(ModelVariant::Ensemble) => "Test_CM_RandomForest.png",
            ChartKind::RocComparison => "Test_ROC_Comparison.png",
            ChartKind::MetricsComparison => "Test_Metrics_Comparison.png",
            ChartKind::Banner => "banner.png",
            ChartKind::Logo => "logo.png",
        }
    }
}

/// Existence-checked lookups into the asset directory.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    /// Create a catalog rooted at an asset directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to a chart, or `None` when the file is absent.
    pub fn chart(&self, kind: ChartKind) -> Option<PathBuf> {
        let path = self.root.join(kind.file_name());
        if path.is_file() {
            Some(path)
        } else {
            log::debug!("asset {} not present, degrading", path.display());
            None
        }
    }
}
