//! Preprocessor + forest bundle: fitted once offline, persisted as JSON,
//! loaded read-only by the evaluator.

use super::forest::{ForestParams, RandomForest};
use super::preprocess::Preprocessor;
use crate::error::{Result, RiskError};
use crate::features::{BodySystem, FeatureVector, Schema};
use crate::synth::TrainingDataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub system: BodySystem,
    pub trained_at: DateTime<Utc>,
    pub n_samples: usize,
    /// Accuracy on the training rows themselves; there is no held-out split.
    pub training_accuracy: f64,
    pub crate_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierPipeline {
    pub metadata: ModelMetadata,
    /// Label names in tier order; probability vectors follow this order.
    pub classes: Vec<String>,
    pub preprocessor: Preprocessor,
    pub forest: RandomForest,
    /// Hex SHA-256 over classes, preprocessor and forest.
    pub checksum: String,
}

fn compute_checksum(classes: &[String], preprocessor: &Preprocessor, forest: &RandomForest) -> Result<String> {
    let payload = serde_json::to_vec(&(classes, preprocessor, forest))?;
    Ok(hex::encode(Sha256::digest(&payload)))
}

impl ClassifierPipeline {
    /// Fit on the full dataset (no validation split).
    pub fn fit(dataset: &TrainingDataset, params: ForestParams) -> Result<Self> {
        let system = dataset.system;
        if dataset.is_empty() {
            return Err(RiskError::TrainingError(format!("empty training dataset for {}", system)));
        }
        let classes: Vec<String> = system.labels().iter().map(|l| l.to_string()).collect();

        let mut rows = Vec::with_capacity(dataset.len());
        let mut y = Vec::with_capacity(dataset.len());
        for (i, (fv, label)) in dataset.rows().iter().enumerate() {
            if fv.system != system {
                return Err(RiskError::TrainingError(format!(
                    "row {} belongs to {}, dataset is {}",
                    i, fv.system, system
                )));
            }
            let class = classes.iter().position(|c| c == label).ok_or_else(|| {
                RiskError::TrainingError(format!("row {}: label `{}` is not a {} label", i, label, system))
            })?;
            rows.push(fv);
            y.push(class);
        }

        let preprocessor = Preprocessor::fit(system, &rows)?;
        let x = preprocessor.transform(&rows)?;
        let forest = RandomForest::fit(x.view(), &y, classes.len(), params)?;

        let proba = forest.predict_proba(x.view());
        let correct = proba
            .outer_iter()
            .zip(&y)
            .filter(|(p, class)| argmax(&p.to_vec()) == **class)
            .count();
        let training_accuracy = correct as f64 / y.len() as f64;

        let checksum = compute_checksum(&classes, &preprocessor, &forest)?;
        info!(
            %system,
            n_samples = dataset.len(),
            n_trees = params.n_trees,
            features = preprocessor.width(),
            training_accuracy,
            "classifier trained"
        );
        Ok(Self {
            metadata: ModelMetadata {
                system,
                trained_at: Utc::now(),
                n_samples: dataset.len(),
                training_accuracy,
                crate_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            classes,
            preprocessor,
            forest,
            checksum,
        })
    }

    pub fn system(&self) -> BodySystem {
        self.metadata.system
    }

    /// Probability per class, in `classes` order.
    pub fn predict_proba(&self, fv: &FeatureVector) -> Result<Vec<f64>> {
        let x = self.preprocessor.transform(&[fv])?;
        Ok(self.forest.predict_proba_row(x.row(0)))
    }

    /// Predicted label plus the full label → probability map.
    pub fn predict(&self, fv: &FeatureVector) -> Result<(String, BTreeMap<String, f64>)> {
        let proba = self.predict_proba(fv)?;
        let best = argmax(&proba);
        let map = self.classes.iter().cloned().zip(proba.iter().copied()).collect();
        Ok((self.classes[best].clone(), map))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!(path = %path.display(), system = %self.system(), "classifier artifact saved");
        Ok(())
    }

    /// Load and verify an artifact. Every failure is `ModelUnavailable`.
    pub fn load(system: BodySystem, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RiskError::unavailable(
                system,
                format!("artifact not found at {}", path.display()),
            ));
        }
        let file = File::open(path)
            .map_err(|e| RiskError::unavailable(system, format!("cannot open {}: {}", path.display(), e)))?;
        let pipeline: ClassifierPipeline = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| RiskError::unavailable(system, format!("corrupt artifact {}: {}", path.display(), e)))?;

        if pipeline.metadata.system != system {
            return Err(RiskError::unavailable(
                system,
                format!("artifact {} was trained for {}", path.display(), pipeline.metadata.system),
            ));
        }
        let expected = compute_checksum(&pipeline.classes, &pipeline.preprocessor, &pipeline.forest)
            .map_err(|e| RiskError::unavailable(system, e.to_string()))?;
        if expected != pipeline.checksum {
            return Err(RiskError::unavailable(
                system,
                format!("checksum mismatch in {}", path.display()),
            ));
        }
        pipeline.check_consistency()?;
        debug!(path = %path.display(), %system, trained_at = %pipeline.metadata.trained_at, "classifier artifact loaded");
        Ok(pipeline)
    }

    fn check_consistency(&self) -> Result<()> {
        let system = self.system();
        let labels: Vec<String> = system.labels().iter().map(|l| l.to_string()).collect();
        let schema_fields = Schema::for_system(system).fields.len();
        let consistent = self.classes == labels
            && self.preprocessor.system == system
            && self.preprocessor.columns.len() == schema_fields
            && self.forest.n_classes() == self.classes.len()
            && self.forest.n_features() == self.preprocessor.width()
            && self.forest.is_well_formed();
        if consistent {
            Ok(())
        } else {
            Err(RiskError::unavailable(system, "artifact structure does not match the schema"))
        }
    }
}

/// Index of the largest value; ties go to the lowest index.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;

    fn small_params() -> ForestParams {
        ForestParams {
            n_trees: 12,
            ..ForestParams::default()
        }
    }

    #[test]
    fn empty_dataset_is_training_error() {
        let ds = TrainingDataset::new(BodySystem::Brain);
        let err = ClassifierPipeline::fit(&ds, small_params()).unwrap_err();
        assert!(matches!(err, RiskError::TrainingError(_)));
    }

    #[test]
    fn unknown_label_is_training_error() {
        let mut ds = synth::generate(BodySystem::Brain, 20, 1).unwrap();
        let fv = ds.rows()[0].0.clone();
        ds.push(fv, "Meltdown");
        assert!(matches!(
            ClassifierPipeline::fit(&ds, small_params()),
            Err(RiskError::TrainingError(_))
        ));
    }

    #[test]
    fn predicts_distribution_over_all_labels() {
        let ds = synth::generate(BodySystem::Brain, 300, 42).unwrap();
        let pipeline = ClassifierPipeline::fit(&ds, small_params()).unwrap();
        for (fv, _) in ds.rows().iter().take(25) {
            let (label, proba) = pipeline.predict(fv).unwrap();
            assert!(BodySystem::Brain.labels().contains(&label.as_str()));
            assert_eq!(proba.len(), 3);
            let sum: f64 = proba.values().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
        assert!(pipeline.metadata.training_accuracy > 0.8);
    }

    #[test]
    fn checksum_is_lowercase_hex_sha256() {
        let ds = synth::generate(BodySystem::Heart, 60, 3).unwrap();
        let pipeline = ClassifierPipeline::fit(&ds, small_params()).unwrap();
        assert_eq!(pipeline.checksum.len(), 64);
        assert!(pipeline
            .checksum
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        let again = compute_checksum(&pipeline.classes, &pipeline.preprocessor, &pipeline.forest).unwrap();
        assert_eq!(again, pipeline.checksum);
    }

    #[test]
    fn argmax_prefers_lowest_on_tie() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), 0);
        assert_eq!(argmax(&[0.1, 0.3, 0.6]), 2);
    }
}
