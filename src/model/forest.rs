//! Bagged ensemble of CART trees.

use super::tree::{DecisionTree, TreeParams};
use crate::error::{Result, RiskError};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub params: ForestParams,
    n_classes: usize,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `params.n_trees` trees, each on a bootstrap sample with √d
    /// features tried per split. Deterministic for a fixed seed.
    pub fn fit(x: ArrayView2<f64>, y: &[usize], n_classes: usize, params: ForestParams) -> Result<Self> {
        let (n_rows, n_features) = x.dim();
        if n_rows == 0 || n_features == 0 {
            return Err(RiskError::TrainingError(format!(
                "cannot fit forest on a {}x{} matrix",
                n_rows, n_features
            )));
        }
        if y.len() != n_rows {
            return Err(RiskError::TrainingError(format!(
                "{} labels for {} rows",
                y.len(),
                n_rows
            )));
        }
        if let Some(bad) = y.iter().find(|&&c| c >= n_classes) {
            return Err(RiskError::TrainingError(format!("class index {} out of range", bad)));
        }
        if params.n_trees == 0 {
            return Err(RiskError::TrainingError("n_trees must be at least 1".into()));
        }

        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: ((n_features as f64).sqrt().round() as usize).max(1),
        };
        let mut master = ChaCha8Rng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        for _ in 0..params.n_trees {
            let mut rng = ChaCha8Rng::seed_from_u64(master.gen());
            let mut rows: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            trees.push(DecisionTree::fit(x, y, &mut rows, n_classes, &tree_params, &mut rng));
        }
        Ok(Self {
            params,
            n_classes,
            n_features,
            trees,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Mean of the trees' leaf distributions.
    pub fn predict_proba_row(&self, row: ArrayView1<f64>) -> Vec<f64> {
        let mut acc = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (a, p) in acc.iter_mut().zip(tree.predict_row(row)) {
                *a += p;
            }
        }
        let n = self.trees.len().max(1) as f64;
        acc.iter_mut().for_each(|a| *a /= n);
        acc
    }

    pub fn predict_proba(&self, x: ArrayView2<f64>) -> Array2<f64> {
        let mut out = Array2::zeros((x.nrows(), self.n_classes));
        for (i, row) in x.outer_iter().enumerate() {
            for (j, p) in self.predict_proba_row(row).into_iter().enumerate() {
                out[[i, j]] = p;
            }
        }
        out
    }

    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty() && self.trees.iter().all(|t| t.is_well_formed(self.n_features))
    }
}
