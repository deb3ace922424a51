//! Weighted symptom and lab-value tables for the rule-scored systems.

use super::{Condition, WeightedCondition};
use crate::features::{BodySystem, FeatureVector};
use crate::risk::{Cutoffs, RiskTier};
use serde::Serialize;

#[derive(Debug)]
pub struct ScoreTable {
    pub system: BodySystem,
    pub conditions: &'static [WeightedCondition],
    pub cutoffs: Cutoffs,
}

/// Result of applying a table to one vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u32,
    pub tier: RiskTier,
    /// Findings of the conditions that fired, in table order.
    pub fired: Vec<&'static str>,
}

const fn symptom(finding: &'static str, field: &'static str) -> WeightedCondition {
    WeightedCondition {
        finding,
        weight: 1,
        condition: Condition::Flag(field),
    }
}

const fn weighted(finding: &'static str, weight: u32, condition: Condition) -> WeightedCondition {
    WeightedCondition {
        finding,
        weight,
        condition,
    }
}

static LUNGS: ScoreTable = ScoreTable {
    system: BodySystem::Lungs,
    conditions: &[
        symptom("Persistent cough reported", "ChronicCough"),
        symptom("Shortness of breath on light activity", "ShortnessOfBreath"),
        symptom("Wheezing reported", "Wheezing"),
        symptom("Chest tightness reported", "ChestTightness"),
        symptom("History of asthma", "AsthmaHistory"),
        symptom("Current smoker", "Smoker"),
        symptom("Recent pollutant exposure", "PollutantExposure"),
        weighted("Frequent coughing (10+ episodes a day)", 1, Condition::AtLeast("CoughsPerDay", 10.0)),
        weighted("Severe breathlessness score (7+)", 2, Condition::AtLeast("BreathlessnessScore", 7.0)),
        weighted("Oxygen saturation below 95%", 2, Condition::Below("SpO2", 95.0)),
    ],
    cutoffs: Cutoffs::new(3, 6),
};

static LIVER: ScoreTable = ScoreTable {
    system: BodySystem::Liver,
    conditions: &[
        symptom("Persistent fatigue", "Fatigue"),
        symptom("Jaundice (yellowing of skin or eyes)", "Jaundice"),
        symptom("Frequent nausea", "Nausea"),
        symptom("Abdominal swelling", "AbdominalSwelling"),
        symptom("Regular alcohol use", "AlcoholUse"),
        weighted(
            "Elevated liver enzymes (ALT or AST above 50)",
            2,
            Condition::Any(&[Condition::Above("ALT", 50.0), Condition::Above("AST", 50.0)]),
        ),
        weighted("Raised bilirubin (above 1.2 mg/dL)", 2, Condition::Above("Bilirubin", 1.2)),
        weighted("Low albumin (below 3.5 g/dL)", 1, Condition::Below("Albumin", 3.5)),
    ],
    cutoffs: Cutoffs::new(3, 6),
};

static KIDNEY: ScoreTable = ScoreTable {
    system: BodySystem::Kidney,
    conditions: &[
        symptom("Diagnosed hypertension", "Hypertension"),
        symptom("Diagnosed diabetes mellitus", "DiabetesMellitus"),
        symptom("Swelling in feet, ankles or face", "Swelling"),
        symptom("Reduced urination", "ReducedUrination"),
        symptom("Persistent fatigue", "Fatigue"),
        weighted("Raised serum creatinine (above 1.3 mg/dL)", 2, Condition::Above("SerumCreatinine", 1.3)),
        weighted("Albumin detected in urine (grade 2+)", 2, Condition::AtLeast("AlbuminUrine", 2.0)),
        weighted("Low hemoglobin (below 12 g/dL)", 1, Condition::Below("Hemoglobin", 12.0)),
        weighted("Blood pressure above 140 mm Hg", 1, Condition::Above("BloodPressure", 140.0)),
        weighted("Sugar detected in urine (grade 2+)", 1, Condition::AtLeast("SugarUrine", 2.0)),
    ],
    cutoffs: Cutoffs::new(4, 8),
};

static DIABETES: ScoreTable = ScoreTable {
    system: BodySystem::Diabetes,
    conditions: &[
        symptom("Frequent urination", "FrequentUrination"),
        symptom("Excessive thirst", "ExcessiveThirst"),
        symptom("Unexplained weight loss", "UnexplainedWeightLoss"),
        symptom("Blurred vision", "BlurredVision"),
        symptom("Slow-healing cuts or sores", "SlowHealing"),
        symptom("Family history of diabetes", "FamilyHistory"),
        weighted("Fasting blood sugar 126 mg/dL or higher", 2, Condition::AtLeast("FBS", 126.0)),
        weighted("Post-meal blood sugar 200 mg/dL or higher", 2, Condition::AtLeast("PPBS", 200.0)),
        weighted("HbA1c 6.5% or higher", 2, Condition::AtLeast("HbA1c", 6.5)),
    ],
    cutoffs: Cutoffs::new(3, 6),
};

impl ScoreTable {
    /// Table for a rule-scored system; `None` for classifier systems.
    pub fn for_system(system: BodySystem) -> Option<&'static ScoreTable> {
        match system {
            BodySystem::Lungs => Some(&LUNGS),
            BodySystem::Liver => Some(&LIVER),
            BodySystem::Kidney => Some(&KIDNEY),
            BodySystem::Diabetes => Some(&DIABETES),
            BodySystem::Heart | BodySystem::Brain => None,
        }
    }

    pub fn score(&self, fv: &FeatureVector) -> ScoreBreakdown {
        let mut score = 0u32;
        let mut fired = Vec::new();
        for wc in self.conditions {
            if wc.condition.holds(fv) {
                score += wc.weight;
                fired.push(wc.finding);
            }
        }
        ScoreBreakdown {
            score,
            tier: self.cutoffs.tier(score),
            fired,
        }
    }

    /// Highest score the table can produce.
    pub fn max_score(&self) -> u32 {
        self.conditions.iter().map(|wc| wc.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liver(fatigue: bool, jaundice: bool, alt: i64, ast: i64, bilirubin: f64, albumin: f64) -> FeatureVector {
        FeatureVector::new(BodySystem::Liver)
            .with("Fatigue", fatigue)
            .with("Jaundice", jaundice)
            .with("Nausea", false)
            .with("AbdominalSwelling", false)
            .with("AlcoholUse", false)
            .with("ALT", alt)
            .with("AST", ast)
            .with("Bilirubin", bilirubin)
            .with("Albumin", albumin)
    }

    #[test]
    fn liver_scenario_scores_seven() {
        let table = ScoreTable::for_system(BodySystem::Liver).unwrap();
        let out = table.score(&liver(true, true, 60, 55, 1.5, 3.0));
        assert_eq!(out.score, 7);
        assert_eq!(out.tier, RiskTier::High);
        assert_eq!(out.fired.len(), 5);
    }

    #[test]
    fn enzyme_condition_counts_once() {
        let table = ScoreTable::for_system(BodySystem::Liver).unwrap();
        let only_alt = table.score(&liver(false, false, 80, 20, 0.8, 4.0));
        let both = table.score(&liver(false, false, 80, 90, 0.8, 4.0));
        assert_eq!(only_alt.score, 2);
        assert_eq!(both.score, 2);
    }

    #[test]
    fn diabetes_scenario_scores_zero() {
        let table = ScoreTable::for_system(BodySystem::Diabetes).unwrap();
        let fv = FeatureVector::new(BodySystem::Diabetes)
            .with("FrequentUrination", false)
            .with("ExcessiveThirst", false)
            .with("UnexplainedWeightLoss", false)
            .with("BlurredVision", false)
            .with("SlowHealing", false)
            .with("FamilyHistory", false)
            .with("FBS", 110)
            .with("PPBS", 160)
            .with("HbA1c", 6.0);
        let out = table.score(&fv);
        assert_eq!(out.score, 0);
        assert_eq!(out.tier, RiskTier::Low);
        assert!(out.fired.is_empty());
    }

    struct Kidney {
        flags: usize,
        bp: i64,
        creatinine: f64,
        hemoglobin: f64,
        albumin: i64,
        sugar: i64,
    }

    impl Kidney {
        /// Every lab value sits exactly on its threshold without crossing it.
        fn at_edges() -> Self {
            Self {
                flags: 0,
                bp: 140,
                creatinine: 1.3,
                hemoglobin: 12.0,
                albumin: 1,
                sugar: 1,
            }
        }

        fn vector(&self) -> FeatureVector {
            let names = ["Hypertension", "DiabetesMellitus", "Swelling", "ReducedUrination", "Fatigue"];
            let mut fv = FeatureVector::new(BodySystem::Kidney);
            for (i, name) in names.iter().enumerate() {
                fv.set(name, i < self.flags);
            }
            fv.with("BloodPressure", self.bp)
                .with("SerumCreatinine", self.creatinine)
                .with("Hemoglobin", self.hemoglobin)
                .with("AlbuminUrine", self.albumin)
                .with("SugarUrine", self.sugar)
        }
    }

    #[test]
    fn kidney_cutoffs_are_four_and_eight() {
        let table = ScoreTable::for_system(BodySystem::Kidney).unwrap();
        let score = |k: &Kidney| table.score(&k.vector());

        let edges = score(&Kidney::at_edges());
        assert_eq!(edges.score, 0);
        assert_eq!(edges.tier, RiskTier::Low);

        let four = score(&Kidney { flags: 4, ..Kidney::at_edges() });
        assert_eq!((four.score, four.tier), (4, RiskTier::Low));

        let five = score(&Kidney { flags: 5, ..Kidney::at_edges() });
        assert_eq!((five.score, five.tier), (5, RiskTier::Moderate));

        // albumin grade 2 is inclusive (+2), BP 141 crosses the strict bound (+1)
        let eight = score(&Kidney {
            flags: 5,
            albumin: 2,
            bp: 141,
            ..Kidney::at_edges()
        });
        assert_eq!((eight.score, eight.tier), (8, RiskTier::Moderate));

        let nine = score(&Kidney {
            flags: 5,
            albumin: 2,
            bp: 141,
            sugar: 2,
            ..Kidney::at_edges()
        });
        assert_eq!((nine.score, nine.tier), (9, RiskTier::High));
    }

    #[test]
    fn kidney_strict_thresholds_need_crossing() {
        let table = ScoreTable::for_system(BodySystem::Kidney).unwrap();
        let creatinine = table.score(&Kidney { creatinine: 1.31, ..Kidney::at_edges() }.vector());
        assert_eq!(creatinine.score, 2);
        let hemoglobin = table.score(&Kidney { hemoglobin: 11.9, ..Kidney::at_edges() }.vector());
        assert_eq!(hemoglobin.score, 1);
        let sugar = table.score(&Kidney { sugar: 2, ..Kidney::at_edges() }.vector());
        assert_eq!(sugar.score, 1);
    }

    fn lungs(coughs: i64, spo2: f64) -> FeatureVector {
        let mut fv = FeatureVector::new(BodySystem::Lungs);
        for name in [
            "ChronicCough",
            "ShortnessOfBreath",
            "Wheezing",
            "ChestTightness",
            "AsthmaHistory",
            "Smoker",
            "PollutantExposure",
        ] {
            fv.set(name, false);
        }
        fv.with("CoughsPerDay", coughs)
            .with("BreathlessnessScore", 1)
            .with("SpO2", spo2)
    }

    #[test]
    fn lungs_edges_follow_comparisons() {
        let table = ScoreTable::for_system(BodySystem::Lungs).unwrap();
        assert_eq!(table.score(&lungs(9, 95.0)).score, 0);
        // CoughsPerDay is inclusive at 10, SpO2 strict below 95
        assert_eq!(table.score(&lungs(10, 95.0)).score, 1);
        assert_eq!(table.score(&lungs(9, 94.9)).score, 2);
    }

    #[test]
    fn classifier_systems_have_no_table() {
        assert!(ScoreTable::for_system(BodySystem::Heart).is_none());
        assert!(ScoreTable::for_system(BodySystem::Brain).is_none());
    }

    #[test]
    fn all_weights_positive() {
        for system in BodySystem::ALL {
            if let Some(table) = ScoreTable::for_system(system) {
                assert!(table.conditions.iter().all(|wc| wc.weight > 0));
                assert!(table.cutoffs.low < table.cutoffs.high);
                assert!(table.max_score() > table.cutoffs.high);
            }
        }
    }
}
