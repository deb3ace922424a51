//! Predictor configuration: artifact location, training parameters, reports, logging.

use crate::features::BodySystem;
use crate::model::ForestParams;
use crate::synth::SamplingProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Directory holding `<system>_model.json` artifacts
    pub model_dir: PathBuf,
    /// Offline training parameters
    pub training: TrainingConfig,
    /// Report export
    pub report: ReportConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub heart_samples: usize,
    pub brain_samples: usize,
    /// Seed for both synthetic sampling and the forest
    pub seed: u64,
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default directory for exported reports
    pub dir: PathBuf,
    /// Include lifestyle tips and recommended tests
    pub include_advice: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            training: TrainingConfig::default(),
            report: ReportConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_samples(system: BodySystem) -> usize {
    SamplingProfile::for_system(system).map_or(0, |p| p.default_samples)
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            heart_samples: default_samples(BodySystem::Heart),
            brain_samples: default_samples(BodySystem::Brain),
            seed: 42,
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("reports"),
            include_advice: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TrainingConfig {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            seed: self.seed,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }

    /// Synthetic sample count for a classifier system; 0 for rule systems.
    pub fn samples_for(&self, system: BodySystem) -> usize {
        match system {
            BodySystem::Heart => self.heart_samples,
            BodySystem::Brain => self.brain_samples,
            _ => 0,
        }
    }
}

impl PredictorConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<PredictorConfig>(&data) {
                    Ok(c) => return c,
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults"),
                },
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "unreadable config; using defaults"),
            }
        }
        Self::default()
    }
}
