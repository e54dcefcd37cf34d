//! CART decision trees and the random forest ensemble

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ml::rng::SplitMix64;

/// Errors from forest training
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("training set is empty")]
    EmptyDataset,

    #[error("row {row} has {found} features, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("rows ({rows}) and labels ({labels}) have different lengths")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("row {row} has class {class}, but only {classes} classes were declared")]
    LabelOutOfRange {
        row: usize,
        class: usize,
        classes: usize,
    },

    #[error("at least one class is required")]
    NoClasses,
}

/// Tuning parameters for forest training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,

    /// Maximum tree depth; nodes at the limit become leaves
    pub max_depth: usize,

    /// Minimum samples a node needs before a split is attempted
    pub min_samples_split: usize,

    /// Seed for the bootstrap and feature-sampling streams
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 32,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single CART tree trained on Gini impurity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Predict the class index for one feature row
    pub fn predict(&self, features: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// A bagged ensemble of CART trees with majority voting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Train the ensemble.
    ///
    /// Each tree sees a bootstrap resample of the training rows and
    /// considers `sqrt(n_features)` candidate features per split. All
    /// randomness derives from `params.seed`, so the same inputs always
    /// produce the same forest.
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, TrainError> {
        if rows.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if n_classes == 0 {
            return Err(TrainError::NoClasses);
        }

        let n_features = rows[0].len();
        for (row, features) in rows.iter().enumerate() {
            if features.len() != n_features {
                return Err(TrainError::RaggedRow {
                    row,
                    found: features.len(),
                    expected: n_features,
                });
            }
        }
        for (row, &class) in labels.iter().enumerate() {
            if class >= n_classes {
                return Err(TrainError::LabelOutOfRange {
                    row,
                    class,
                    classes: n_classes,
                });
            }
        }

        let n_feature_candidates = (n_features as f64).sqrt().floor().max(1.0) as usize;
        let builder = TreeBuilder {
            rows,
            labels,
            n_classes,
            n_feature_candidates,
            params,
        };

        let mut master = SplitMix64::new(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        for _ in 0..params.n_trees {
            let mut rng = SplitMix64::new(master.next_u64());
            let sample: Vec<usize> = (0..rows.len())
                .map(|_| rng.next_index(rows.len()))
                .collect();
            let root = builder.build(sample, 0, &mut rng);
            trees.push(DecisionTree { root });
        }

        Ok(Self {
            trees,
            n_classes,
            n_features,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Predict a class index by majority vote over the trees; ties break
    /// toward the lower class index
    pub fn predict(&self, features: &[f64]) -> usize {
        debug_assert_eq!(features.len(), self.n_features);
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(features)] += 1;
        }
        majority_class(&votes)
    }
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    n_feature_candidates: usize,
    params: &'a ForestParams,
}

impl TreeBuilder<'_> {
    fn build(&self, indices: Vec<usize>, depth: usize, rng: &mut SplitMix64) -> Node {
        let counts = self.class_counts(&indices);
        let majority = majority_class(&counts);

        let n_present = counts.iter().filter(|&&c| c > 0).count();
        if n_present <= 1
            || depth >= self.params.max_depth
            || indices.len() < self.params.min_samples_split
        {
            return Node::Leaf { class: majority };
        }

        let Some((feature, threshold)) = self.best_split(&indices, rng) else {
            return Node::Leaf { class: majority };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.rows[i][feature] <= threshold);
        if left_idx.is_empty() || right_idx.is_empty() {
            return Node::Leaf { class: majority };
        }

        Node::Split {
            feature,
            threshold,
            left: Box::new(self.build(left_idx, depth + 1, rng)),
            right: Box::new(self.build(right_idx, depth + 1, rng)),
        }
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    /// Pick the (feature, threshold) minimizing weighted Gini impurity
    /// over a random subset of the features
    fn best_split(&self, indices: &[usize], rng: &mut SplitMix64) -> Option<(usize, f64)> {
        let n_features = self.rows[indices[0]].len();
        let candidates = sample_features(n_features, self.n_feature_candidates, rng);

        let parent = gini(&self.class_counts(indices), indices.len());
        let mut best: Option<(usize, f64, f64)> = None;

        for feature in candidates {
            let mut ordered: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (self.rows[i][feature], self.labels[i]))
                .collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

            let total = ordered.len();
            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = self.class_counts(indices);

            for pos in 0..total - 1 {
                let (value, label) = ordered[pos];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                let next_value = ordered[pos + 1].0;
                // equal or non-finite neighbors cannot anchor a threshold
                if value == next_value || !value.is_finite() || !next_value.is_finite() {
                    continue;
                }

                let left_len = pos + 1;
                let right_len = total - left_len;
                let weighted = (left_len as f64 * gini(&left_counts, left_len)
                    + right_len as f64 * gini(&right_counts, right_len))
                    / total as f64;

                let to_beat = best.map_or(parent, |(_, _, impurity)| impurity);
                if weighted + 1e-12 < to_beat {
                    best = Some((feature, (value + next_value) / 2.0, weighted));
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Majority class; ties break toward the lower class index
fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

/// Draw `k` distinct feature indices out of `0..n`
fn sample_features(n: usize, k: usize, rng: &mut SplitMix64) -> Vec<usize> {
    let mut features: Vec<usize> = (0..n).collect();
    let k = k.min(n);
    for i in 0..k {
        let j = i + rng.next_index(n - i);
        features.swap(i, j);
    }
    features.truncate(k);
    features
}
