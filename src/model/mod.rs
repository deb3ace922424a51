//! Classifier trainer: column preprocessing, random forest, persisted pipeline.

mod forest;
mod pipeline;
mod preprocess;
mod tree;

pub use forest::{ForestParams, RandomForest};
pub use pipeline::{ClassifierPipeline, ModelMetadata};
pub use preprocess::{Column, Preprocessor};
pub use tree::{DecisionTree, Node, TreeParams};

use crate::error::Result;
use crate::features::BodySystem;
use crate::synth;
use std::path::{Path, PathBuf};

/// Generate the system's synthetic dataset, fit, and write the artifact into
/// `model_dir`. Returns the artifact path.
pub fn train_and_save(
    system: BodySystem,
    samples: usize,
    seed: u64,
    params: ForestParams,
    model_dir: &Path,
) -> Result<PathBuf> {
    let dataset = synth::generate(system, samples, seed)?;
    let pipeline = ClassifierPipeline::fit(&dataset, params)?;
    let path = model_dir.join(system.artifact_file_name());
    pipeline.save(&path)?;
    Ok(path)
}
