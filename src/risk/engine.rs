//! Per-system evaluators behind one `evaluate` contract, and the engine that
//! owns one evaluator per body system.

use super::RiskAssessment;
use crate::config::PredictorConfig;
use crate::error::{Result, RiskError};
use crate::features::{BodySystem, FeatureVector, Schema, Strategy};
use crate::model::ClassifierPipeline;
use crate::rules::ScoreTable;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub trait Evaluator {
    fn system(&self) -> BodySystem;

    /// Validate `features` against the system schema, then classify.
    fn evaluate(&self, features: &FeatureVector) -> Result<RiskAssessment>;
}

/// Strategy A: trained classifier pipeline, shared read-only.
pub struct ClassifierEvaluator {
    pipeline: Arc<ClassifierPipeline>,
}

impl ClassifierEvaluator {
    pub fn new(pipeline: Arc<ClassifierPipeline>) -> Self {
        Self { pipeline }
    }

    /// Load the artifact; fails with `ModelUnavailable`.
    pub fn load(system: BodySystem, path: &Path) -> Result<Self> {
        let pipeline = ClassifierPipeline::load(system, path)?;
        Ok(Self::new(Arc::new(pipeline)))
    }
}

impl Evaluator for ClassifierEvaluator {
    fn system(&self) -> BodySystem {
        self.pipeline.system()
    }

    fn evaluate(&self, features: &FeatureVector) -> Result<RiskAssessment> {
        let system = self.system();
        Schema::for_system(system).validate(features)?;
        let (label, probabilities) = self.pipeline.predict(features)?;
        let tier = system
            .tier_for(&label)
            .ok_or_else(|| RiskError::unavailable(system, format!("model predicted unknown label `{}`", label)))?;
        debug!(%system, %label, "classifier evaluation");
        Ok(RiskAssessment::new(system, tier, &[]).with_probabilities(probabilities))
    }
}

/// Strategy B: weighted-sum score with fixed cutoffs.
pub struct RuleEvaluator {
    table: &'static ScoreTable,
}

impl RuleEvaluator {
    /// `None` for systems without a score table.
    pub fn for_system(system: BodySystem) -> Option<Self> {
        ScoreTable::for_system(system).map(|table| Self { table })
    }
}

impl Evaluator for RuleEvaluator {
    fn system(&self) -> BodySystem {
        self.table.system
    }

    fn evaluate(&self, features: &FeatureVector) -> Result<RiskAssessment> {
        let system = self.system();
        Schema::for_system(system).validate(features)?;
        let breakdown = self.table.score(features);
        debug!(%system, score = breakdown.score, tier = %breakdown.tier, "rule evaluation");
        Ok(RiskAssessment::new(system, breakdown.tier, &breakdown.fired).with_score(breakdown.score))
    }
}

/// Evaluator selected by the system's strategy at construction time.
pub enum SystemEvaluator {
    Classifier(ClassifierEvaluator),
    Rules(RuleEvaluator),
    /// Classifier system whose artifact could not be loaded.
    Unavailable { system: BodySystem, reason: String },
}

impl SystemEvaluator {
    pub fn build(system: BodySystem, model_dir: &Path) -> Self {
        match system.strategy() {
            Strategy::RuleScored => match RuleEvaluator::for_system(system) {
                Some(rules) => SystemEvaluator::Rules(rules),
                None => SystemEvaluator::Unavailable {
                    system,
                    reason: "no score table".to_string(),
                },
            },
            Strategy::Classifier => {
                let path = model_dir.join(system.artifact_file_name());
                match ClassifierEvaluator::load(system, &path) {
                    Ok(evaluator) => {
                        info!(%system, path = %path.display(), "classifier loaded");
                        SystemEvaluator::Classifier(evaluator)
                    }
                    Err(e) => {
                        warn!(%system, error = %e, "classifier unavailable; evaluations will report ModelUnavailable");
                        SystemEvaluator::Unavailable {
                            system,
                            reason: e.to_string(),
                        }
                    }
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, SystemEvaluator::Unavailable { .. })
    }
}

impl Evaluator for SystemEvaluator {
    fn system(&self) -> BodySystem {
        match self {
            SystemEvaluator::Classifier(c) => c.system(),
            SystemEvaluator::Rules(r) => r.system(),
            SystemEvaluator::Unavailable { system, .. } => *system,
        }
    }

    fn evaluate(&self, features: &FeatureVector) -> Result<RiskAssessment> {
        match self {
            SystemEvaluator::Classifier(c) => c.evaluate(features),
            SystemEvaluator::Rules(r) => r.evaluate(features),
            SystemEvaluator::Unavailable { system, reason } => Err(RiskError::unavailable(*system, reason.clone())),
        }
    }
}

/// One evaluator per body system; construct once, evaluate many times.
pub struct RiskEngine {
    evaluators: BTreeMap<BodySystem, SystemEvaluator>,
}

impl RiskEngine {
    pub fn new(config: &PredictorConfig) -> Self {
        Self::from_model_dir(&config.model_dir)
    }

    pub fn from_model_dir(model_dir: &Path) -> Self {
        let evaluators = BodySystem::ALL
            .iter()
            .map(|&system| (system, SystemEvaluator::build(system, model_dir)))
            .collect();
        Self { evaluators }
    }

    /// Replace one system's evaluator, e.g. with an in-memory pipeline.
    pub fn with_evaluator(mut self, evaluator: SystemEvaluator) -> Self {
        self.evaluators.insert(evaluator.system(), evaluator);
        self
    }

    pub fn evaluator(&self, system: BodySystem) -> Option<&SystemEvaluator> {
        self.evaluators.get(&system)
    }

    pub fn is_available(&self, system: BodySystem) -> bool {
        self.evaluator(system).is_some_and(SystemEvaluator::is_available)
    }

    pub fn evaluate(&self, features: &FeatureVector) -> Result<RiskAssessment> {
        let system = features.system;
        match self.evaluators.get(&system) {
            Some(evaluator) => evaluator.evaluate(features),
            None => Err(RiskError::unavailable(system, "no evaluator registered")),
        }
    }
}
