use super::RiskTier;
use crate::explain::{self, Advice};
use crate::features::BodySystem;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Outcome of one evaluation. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub id: String,
    pub system: BodySystem,
    pub tier: RiskTier,
    /// System-specific label name for the tier.
    pub label: String,
    /// Cumulative score (rule-scored systems only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Label → probability (classifier systems only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    pub headline: &'static str,
    /// Findings first, then the canned insights for the tier.
    pub insights: Vec<String>,
    pub advice: &'static Advice,
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    pub(crate) fn new(system: BodySystem, tier: RiskTier, findings: &[&str]) -> Self {
        let explanation = explain::explain(system, tier);
        let insights = findings
            .iter()
            .map(|f| f.to_string())
            .chain(explanation.insights.iter().map(|s| s.to_string()))
            .collect();
        Self {
            id: Uuid::new_v4().to_string(),
            system,
            tier,
            label: system.label_for(tier).to_string(),
            score: None,
            probabilities: None,
            headline: explanation.headline,
            insights,
            advice: &explanation.advice,
            assessed_at: Utc::now(),
        }
    }

    pub(crate) fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub(crate) fn with_probabilities(mut self, probabilities: BTreeMap<String, f64>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Probability of the predicted label, if the classifier produced one.
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities.as_ref()?.get(&self.label).copied()
    }
}
