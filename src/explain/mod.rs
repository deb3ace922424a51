//! Canned explanations and advice per (system, tier). Pure lookup.

mod catalog;

use crate::features::BodySystem;
use crate::risk::RiskTier;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Advice {
    pub tips: &'static [&'static str],
    pub tests: &'static [&'static str],
    /// Suggested words for the doctor visit.
    pub doctor_prompt: &'static str,
    /// How soon to see a clinician.
    pub urgency: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub headline: &'static str,
    pub insights: &'static [&'static str],
    pub advice: Advice,
}

pub fn explain(system: BodySystem, tier: RiskTier) -> &'static Explanation {
    catalog::lookup(system, tier)
}

pub const DISCLAIMER: &str =
    "This is an educational tool built on synthetic data and fixed rules. Always consult a doctor for diagnosis.";
