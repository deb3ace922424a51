//! Body systems and the estimation strategy each one uses.

use crate::risk::RiskTier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySystem {
    Heart,
    Brain,
    Lungs,
    Liver,
    Kidney,
    Diabetes,
}

/// How a system turns a feature vector into a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Trained random-forest pipeline loaded from an artifact.
    Classifier,
    /// Deterministic weighted-sum score with fixed cutoffs.
    RuleScored,
}

impl BodySystem {
    pub const ALL: [BodySystem; 6] = [
        BodySystem::Heart,
        BodySystem::Brain,
        BodySystem::Lungs,
        BodySystem::Liver,
        BodySystem::Kidney,
        BodySystem::Diabetes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodySystem::Heart => "heart",
            BodySystem::Brain => "brain",
            BodySystem::Lungs => "lungs",
            BodySystem::Liver => "liver",
            BodySystem::Kidney => "kidney",
            BodySystem::Diabetes => "diabetes",
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            BodySystem::Heart | BodySystem::Brain => Strategy::Classifier,
            _ => Strategy::RuleScored,
        }
    }

    /// Label names ordered Low, Moderate, High.
    pub fn labels(&self) -> [&'static str; 3] {
        match self {
            BodySystem::Heart => ["NoDisease", "LateDiagnosis", "SuddenDeath"],
            BodySystem::Brain => ["NoRisk", "Warning", "EmergencyRisk"],
            _ => ["Low", "Moderate", "High"],
        }
    }

    pub fn label_for(&self, tier: RiskTier) -> &'static str {
        self.labels()[tier.index()]
    }

    pub fn tier_for(&self, label: &str) -> Option<RiskTier> {
        self.labels()
            .iter()
            .position(|l| *l == label)
            .and_then(RiskTier::from_index)
    }

    /// File name of the persisted classifier artifact.
    pub fn artifact_file_name(&self) -> String {
        format!("{}_model.json", self.as_str())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BodySystem::Heart => "Heart",
            BodySystem::Brain => "Brain",
            BodySystem::Lungs => "Lungs",
            BodySystem::Liver => "Liver",
            BodySystem::Kidney => "Kidney",
            BodySystem::Diabetes => "Diabetes",
        }
    }
}

impl fmt::Display for BodySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodySystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        BodySystem::ALL
            .iter()
            .copied()
            .find(|sys| sys.as_str() == lowered || (lowered == "lung" && *sys == BodySystem::Lungs))
            .ok_or_else(|| {
                format!(
                    "unknown body system `{}` (expected one of: heart, brain, lungs, liver, kidney, diabetes)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_tiers() {
        for system in BodySystem::ALL {
            for label in system.labels() {
                let tier = system.tier_for(label).unwrap();
                assert_eq!(system.label_for(tier), label);
            }
            assert!(system.tier_for("NotALabel").is_none());
        }
    }

    #[test]
    fn strategy_split() {
        assert_eq!(BodySystem::Heart.strategy(), Strategy::Classifier);
        assert_eq!(BodySystem::Brain.strategy(), Strategy::Classifier);
        assert_eq!(BodySystem::Liver.strategy(), Strategy::RuleScored);
        assert_eq!(BodySystem::Diabetes.strategy(), Strategy::RuleScored);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Brain".parse::<BodySystem>().unwrap(), BodySystem::Brain);
        assert_eq!(" KIDNEY ".parse::<BodySystem>().unwrap(), BodySystem::Kidney);
        assert!("spleen".parse::<BodySystem>().is_err());
    }
}
