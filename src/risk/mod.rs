//! Risk evaluation: tiers, assessments, and the per-system evaluators.

mod assessment;
mod engine;
mod tier;

pub use assessment::RiskAssessment;
pub use engine::{ClassifierEvaluator, Evaluator, RiskEngine, RuleEvaluator, SystemEvaluator};
pub use tier::{Cutoffs, RiskTier};
