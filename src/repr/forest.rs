//! Tree-ensemble classifier representation.
//!
//! Trees are stored in flat parallel arrays indexed by node. Node 0 is the
//! root, so 0 can never be a child index; `children_left[i] == 0` marks node
//! `i` as a leaf. Leaf values are positive-class fractions in `[0, 1]`, and
//! the ensemble probability is their mean (soft voting). Per-node impurity
//! gains are kept for feature importances.

/// A single decision tree in flat-array layout.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    thresholds: Box<[f32]>,
    children_left: Box<[u32]>,
    children_right: Box<[u32]>,
    default_left: Box<[bool]>,
    leaf_values: Box<[f32]>,
    gains: Box<[f32]>,
}

impl Tree {
    /// Create a tree from its parallel node arrays.
    ///
    /// All arrays must have the same length (one entry per node). Structural
    /// validity (child indices in range, leaf values in `[0, 1]`) is checked
    /// when converting from an artifact payload, not here.
    ///
    /// # Panics
    ///
    /// Panics if the array lengths differ.
    pub fn from_arrays(
        split_indices: Vec<u32>,
        thresholds: Vec<f32>,
        children_left: Vec<u32>,
        children_right: Vec<u32>,
        default_left: Vec<bool>,
        leaf_values: Vec<f32>,
        gains: Vec<f32>,
    ) -> Self {
        let n = split_indices.len();
        assert_eq!(thresholds.len(), n, "thresholds length mismatch");
        assert_eq!(children_left.len(), n, "children_left length mismatch");
        assert_eq!(children_right.len(), n, "children_right length mismatch");
        assert_eq!(default_left.len(), n, "default_left length mismatch");
        assert_eq!(leaf_values.len(), n, "leaf_values length mismatch");
        assert_eq!(gains.len(), n, "gains length mismatch");
        Self {
            split_indices: split_indices.into_boxed_slice(),
            thresholds: thresholds.into_boxed_slice(),
            children_left: children_left.into_boxed_slice(),
            children_right: children_right.into_boxed_slice(),
            default_left: default_left.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
            gains: gains.into_boxed_slice(),
        }
    }

    /// Number of nodes (internal + leaves).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.split_indices.len()
    }

    /// Whether a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == 0
    }

    /// Split feature index of an internal node.
    #[inline]
    pub fn split_index(&self, node: usize) -> usize {
        self.split_indices[node] as usize
    }

    /// Impurity gain recorded for a node (0 for leaves).
    #[inline]
    pub fn gain(&self, node: usize) -> f32 {
        self.gains[node]
    }

    /// Route a sample to its leaf and return the leaf value.
    ///
    /// Missing features (NaN) follow the node's default direction.
    pub fn leaf_value(&self, features: &[f32]) -> f32 {
        let mut node = 0usize;
        loop {
            if self.is_leaf(node) {
                return self.leaf_values[node];
            }
            let x = features[self.split_indices[node] as usize];
            let go_left = if x.is_nan() {
                self.default_left[node]
            } else {
                x < self.thresholds[node]
            };
            node = if go_left {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// A soft-voting ensemble of decision trees.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    n_features: usize,
}

impl TreeEnsemble {
    /// Create an ensemble from its trees.
    pub fn new(trees: Vec<Tree>, n_features: usize) -> Self {
        Self { trees, n_features }
    }

    /// Number of features the ensemble expects.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The trees, in training order.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Mean leaf value across all trees (the positive-class probability).
    ///
    /// Returns `None` for an empty ensemble.
    pub fn mean_leaf_value(&self, features: &[f32]) -> Option<f32> {
        if self.trees.is_empty() {
            return None;
        }
        let sum: f32 = self.trees.iter().map(|t| t.leaf_value(features)).sum();
        Some(sum / self.trees.len() as f32)
    }

    /// Impurity-based feature importances.
    ///
    /// Per-feature sums of split gains across all trees, normalized to sum
    /// to 1. All-zero (unnormalized) when no tree has a split.
    pub fn impurity_importances(&self) -> Vec<f32> {
        let mut totals = vec![0.0f32; self.n_features];
        for tree in &self.trees {
            for node in 0..tree.num_nodes() {
                if !tree.is_leaf(node) {
                    totals[tree.split_index(node)] += tree.gain(node);
                }
            }
        }
        let sum: f32 = totals.iter().sum();
        if sum > 0.0 {
            for value in &mut totals {
                *value /= sum;
            }
        }
        totals
    }
}
