//! CART decision tree with Gini impurity and per-split feature sampling.

use ndarray::{ArrayView1, ArrayView2};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Class distribution of the training rows that reached the leaf.
    Leaf { distribution: Vec<f64> },
    /// Rows with `x[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features considered at each split.
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn class_counts(y: &[usize], rows: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in rows {
        counts[y[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

/// Gini of `total - left` without allocating the right-hand counts.
fn gini_remainder(total: &[usize], left: &[usize], n_right: usize) -> f64 {
    if n_right == 0 {
        return 0.0;
    }
    let n = n_right as f64;
    1.0 - total
        .iter()
        .zip(left)
        .map(|(t, l)| ((t - l) as f64 / n).powi(2))
        .sum::<f64>()
}

fn leaf(counts: &[usize]) -> Node {
    let total: usize = counts.iter().sum();
    let distribution = if total == 0 {
        vec![1.0 / counts.len() as f64; counts.len()]
    } else {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    };
    Node::Leaf { distribution }
}

/// Move rows satisfying `pred` to the front; returns how many did.
fn partition_in_place(rows: &mut [usize], pred: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for k in 0..rows.len() {
        if pred(rows[k]) {
            rows.swap(mid, k);
            mid += 1;
        }
    }
    mid
}

impl DecisionTree {
    /// Grow a tree on the given row indices (duplicates allowed, as produced
    /// by bootstrap sampling).
    pub fn fit<R: Rng>(
        x: ArrayView2<f64>,
        y: &[usize],
        rows: &mut [usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = DecisionTree {
            nodes: Vec::new(),
            n_classes,
        };
        tree.grow(x, y, rows, 0, params, rng);
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        x: ArrayView2<f64>,
        y: &[usize],
        rows: &mut [usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> usize {
        let id = self.nodes.len();
        let counts = class_counts(y, rows, self.n_classes);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
        if pure || depth_reached || rows.len() < params.min_samples_split.max(2) {
            self.nodes.push(leaf(&counts));
            return id;
        }

        let parent = gini(&counts, rows.len());
        let Some(best) = self.best_split(x, y, rows, params, rng) else {
            self.nodes.push(leaf(&counts));
            return id;
        };
        if best.impurity >= parent - 1e-12 {
            self.nodes.push(leaf(&counts));
            return id;
        }

        // placeholder until both children exist
        self.nodes.push(leaf(&counts));
        let mid = partition_in_place(rows, |i| x[[i, best.feature]] <= best.threshold);
        let (left_rows, right_rows) = rows.split_at_mut(mid);
        let left = self.grow(x, y, left_rows, depth + 1, params, rng);
        let right = self.grow(x, y, right_rows, depth + 1, params, rng);
        self.nodes[id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        id
    }

    fn best_split<R: Rng>(
        &self,
        x: ArrayView2<f64>,
        y: &[usize],
        rows: &[usize],
        params: &TreeParams,
        rng: &mut R,
    ) -> Option<SplitCandidate> {
        let n_features = x.ncols();
        let k = params.max_features.clamp(1, n_features.max(1));
        let total = rows.len();
        let total_counts = class_counts(y, rows, self.n_classes);
        let mut best: Option<SplitCandidate> = None;
        let mut sorted = rows.to_vec();

        for feature in index::sample(rng, n_features, k).into_iter() {
            sorted.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));
            let mut left = vec![0usize; self.n_classes];
            for pos in 0..total - 1 {
                left[y[sorted[pos]]] += 1;
                let here = x[[sorted[pos], feature]];
                let next = x[[sorted[pos + 1], feature]];
                if here == next {
                    continue;
                }
                let n_left = pos + 1;
                let n_right = total - n_left;
                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini_remainder(&total_counts, &left, n_right))
                    / total as f64;
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: here + (next - here) / 2.0,
                        impurity,
                    });
                }
            }
        }
        best
    }

    /// Leaf class distribution for one encoded row.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> &[f64] {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Structural check used after deserialising an artifact.
    pub fn is_well_formed(&self, width: usize) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(id, node)| match node {
                Node::Leaf { distribution } => distribution.len() == self.n_classes,
                Node::Split {
                    feature, left, right, ..
                } => *feature < width && *left > id && *right > id && *left < self.nodes.len() && *right < self.nodes.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params(width: usize) -> TreeParams {
        TreeParams {
            max_depth: None,
            min_samples_split: 2,
            max_features: width,
        }
    }

    #[test]
    fn separates_threshold_data() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut rows: Vec<usize> = (0..6).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), &y, &mut rows, 2, &params(1), &mut rng);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict_row(array![2.5].view()), &[1.0, 0.0]);
        assert_eq!(tree.predict_row(array![9.0].view()), &[0.0, 1.0]);
        assert!(tree.is_well_formed(1));
    }

    #[test]
    fn depth_limit_yields_mixed_leaves() {
        let x = array![[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, 1.0]];
        let y = vec![0, 1, 0, 1];
        let mut rows: Vec<usize> = (0..4).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = TreeParams {
            max_depth: Some(0),
            ..params(2)
        };
        let tree = DecisionTree::fit(x.view(), &y, &mut rows, 2, &p, &mut rng);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict_row(array![1.0, 0.0].view()), &[0.5, 0.5]);
    }

    #[test]
    fn identical_features_produce_leaf() {
        let x = array![[1.0], [1.0], [1.0]];
        let y = vec![0, 1, 2];
        let mut rows: Vec<usize> = (0..3).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), &y, &mut rows, 3, &params(1), &mut rng);
        assert_eq!(tree.node_count(), 1);
        let p = tree.predict_row(array![1.0].view());
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
