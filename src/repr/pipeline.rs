//! Multi-step pipeline predictors.
//!
//! Some exported artifacts embed their preprocessing: a scaler step followed
//! by the fitted estimator. The pipeline applies its steps in order; the
//! final step is always an estimator (enforced at conversion time).

use super::forest::TreeEnsemble;
use super::linear::LinearClassifier;

/// An embedded standardization step.
///
/// Applies `(x - mean) / std` per feature, the same transform as the
/// registry-driven standardizer. A variant whose artifact carries a scaler
/// ships with an empty registry stats table so inputs are not scaled twice.
#[derive(Debug, Clone)]
pub struct Scaler {
    means: Box<[f32]>,
    stds: Box<[f32]>,
}

impl Scaler {
    /// Create a scaler from per-feature means and standard deviations.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn new(means: Vec<f32>, stds: Vec<f32>) -> Self {
        assert_eq!(means.len(), stds.len(), "scaler arity mismatch");
        Self {
            means: means.into_boxed_slice(),
            stds: stds.into_boxed_slice(),
        }
    }

    /// Number of features the scaler expects.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Transform a feature slice in place.
    pub fn apply(&self, features: &mut [f32]) {
        debug_assert_eq!(features.len(), self.means.len());
        for ((x, mean), std) in features.iter_mut().zip(&*self.means).zip(&*self.stds) {
            *x = (*x - mean) / std;
        }
    }
}

/// The operation a pipeline step performs.
#[derive(Debug, Clone)]
pub enum StepOp {
    /// Standardization transform.
    Scaler(Scaler),
    /// Fitted linear estimator.
    Linear(LinearClassifier),
    /// Fitted tree-ensemble estimator.
    Ensemble(TreeEnsemble),
}

impl StepOp {
    /// Whether the step is a fitted estimator (vs. a transform).
    pub fn is_estimator(&self) -> bool {
        matches!(self, StepOp::Linear(_) | StepOp::Ensemble(_))
    }

    /// Number of input features the step expects.
    pub fn n_features(&self) -> usize {
        match self {
            StepOp::Scaler(scaler) => scaler.n_features(),
            StepOp::Linear(model) => model.n_features(),
            StepOp::Ensemble(model) => model.n_features(),
        }
    }
}

/// One named pipeline step.
#[derive(Debug, Clone)]
pub struct PipelineStep {
    name: String,
    op: StepOp,
}

impl PipelineStep {
    /// Create a named step.
    pub fn new(name: impl Into<String>, op: StepOp) -> Self {
        Self {
            name: name.into(),
            op,
        }
    }

    /// The step name from the artifact.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The step operation.
    pub fn op(&self) -> &StepOp {
        &self.op
    }
}

/// An ordered sequence of steps ending in an estimator.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// Create a pipeline from its steps.
    ///
    /// Conversion from an artifact payload guarantees the invariants (at
    /// least one step, estimator last, consistent arity); direct construction
    /// is for tests and trusts the caller.
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        Self { steps }
    }

    /// The steps in application order.
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Number of input features, taken from the first step.
    pub fn n_features(&self) -> usize {
        self.steps.first().map(|s| s.op().n_features()).unwrap_or(0)
    }

    /// Find a step by name.
    pub fn step_named(&self, name: &str) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.name() == name)
    }

    /// The last step (the estimator, for converted artifacts).
    pub fn last_step(&self) -> Option<&PipelineStep> {
        self.steps.last()
    }
}
