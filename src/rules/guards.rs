//! Priority-ordered label rules for synthetic training data.

use super::Condition;
use crate::features::{BodySystem, FeatureVector};
use crate::risk::RiskTier;

/// High tier if any `emergency` guard holds, else Moderate if any `warning`
/// guard holds, else Low.
#[derive(Debug)]
pub struct GuardChain {
    pub system: BodySystem,
    pub emergency: &'static [Condition],
    pub warning: &'static [Condition],
}

static BRAIN: GuardChain = GuardChain {
    system: BodySystem::Brain,
    emergency: &[
        Condition::AtLeast("BP_Systolic", 170.0),
        Condition::AtMost("SpO2", 93.0),
        Condition::AtLeast("FastingBloodSugar", 160.0),
        Condition::AtLeast("RestingHR", 100.0),
        Condition::All(&[Condition::Flag("BlurredVision"), Condition::AtLeast("StressLevel", 7.0)]),
        Condition::All(&[Condition::Flag("MobilityDizziness"), Condition::AtLeast("BMI", 32.0)]),
    ],
    warning: &[
        Condition::AtLeast("StressLevel", 6.0),
        Condition::AtLeast("BMI", 28.0),
        Condition::AtLeast("BP_Systolic", 145.0),
        Condition::AtLeast("FastingBloodSugar", 130.0),
    ],
};

static HEART: GuardChain = GuardChain {
    system: BodySystem::Heart,
    emergency: &[
        Condition::All(&[Condition::AtLeast("RestingBP", 155.0), Condition::AtLeast("Cholesterol", 260.0)]),
        Condition::All(&[Condition::Is("ST_Slope", "Down"), Condition::Is("ExerciseAngina", "Y")]),
        Condition::All(&[Condition::Is("ChestPainType", "ASY"), Condition::AtLeast("Oldpeak", 2.5)]),
    ],
    warning: &[
        Condition::AtLeast("Cholesterol", 240.0),
        Condition::AtLeast("RestingBP", 140.0),
        Condition::Flag("FastingBS"),
        Condition::AtLeast("Oldpeak", 2.0),
        Condition::All(&[Condition::Is("ST_Slope", "Flat"), Condition::Below("MaxHR", 130.0)]),
    ],
};

impl GuardChain {
    /// Chain for a classifier system; `None` for rule-scored systems.
    pub fn for_system(system: BodySystem) -> Option<&'static GuardChain> {
        match system {
            BodySystem::Heart => Some(&HEART),
            BodySystem::Brain => Some(&BRAIN),
            _ => None,
        }
    }

    pub fn tier(&self, fv: &FeatureVector) -> RiskTier {
        if self.emergency.iter().any(|c| c.holds(fv)) {
            RiskTier::High
        } else if self.warning.iter().any(|c| c.holds(fv)) {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// System-specific label name for the row.
    pub fn label(&self, fv: &FeatureVector) -> &'static str {
        self.system.label_for(self.tier(fv))
    }
}
