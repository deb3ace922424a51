//! Data-driven condition tables.
//!
//! One small predicate language is shared by two consumers:
//! - [`ScoreTable`]: weighted conditions summed into an integer score for the
//!   rule-scored systems (lungs, liver, kidney, diabetes)
//! - [`GuardChain`]: emergency-then-warning disjunctions that label synthetic
//!   training rows for the classifier systems (heart, brain)

mod guards;
mod scoring;

pub use guards::GuardChain;
pub use scoring::{ScoreBreakdown, ScoreTable};

use crate::features::FeatureVector;

/// Predicate over a feature vector. A field that is absent or of the wrong
/// type never satisfies a comparison.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// Boolean field is set.
    Flag(&'static str),
    /// `field >= value`
    AtLeast(&'static str, f64),
    /// `field > value`
    Above(&'static str, f64),
    /// `field <= value`
    AtMost(&'static str, f64),
    /// `field < value`
    Below(&'static str, f64),
    /// Categorical field equals value.
    Is(&'static str, &'static str),
    All(&'static [Condition]),
    Any(&'static [Condition]),
}

impl Condition {
    pub fn holds(&self, fv: &FeatureVector) -> bool {
        match *self {
            Condition::Flag(field) => fv.flag(field).unwrap_or(false),
            Condition::AtLeast(field, v) => fv.numeric(field).is_some_and(|x| x >= v),
            Condition::Above(field, v) => fv.numeric(field).is_some_and(|x| x > v),
            Condition::AtMost(field, v) => fv.numeric(field).is_some_and(|x| x <= v),
            Condition::Below(field, v) => fv.numeric(field).is_some_and(|x| x < v),
            Condition::Is(field, expected) => fv.category(field) == Some(expected),
            Condition::All(parts) => parts.iter().all(|c| c.holds(fv)),
            Condition::Any(parts) => parts.iter().any(|c| c.holds(fv)),
        }
    }
}

/// Condition contributing `weight` points when it holds.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCondition {
    /// Finding reported when the condition fires.
    pub finding: &'static str,
    pub weight: u32,
    pub condition: Condition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::BodySystem;

    #[test]
    fn comparisons_are_strict_or_inclusive_as_named() {
        let fv = FeatureVector::new(BodySystem::Liver).with("ALT", 50);
        assert!(Condition::AtLeast("ALT", 50.0).holds(&fv));
        assert!(!Condition::Above("ALT", 50.0).holds(&fv));
        assert!(Condition::AtMost("ALT", 50.0).holds(&fv));
        assert!(!Condition::Below("ALT", 50.0).holds(&fv));
    }

    #[test]
    fn missing_field_never_holds() {
        let fv = FeatureVector::new(BodySystem::Liver);
        assert!(!Condition::Flag("Jaundice").holds(&fv));
        assert!(!Condition::Below("Albumin", 3.5).holds(&fv));
        assert!(!Condition::Is("Sex", "Male").holds(&fv));
    }

    #[test]
    fn combinators() {
        static BOTH: &[Condition] = &[Condition::Flag("BlurredVision"), Condition::AtLeast("StressLevel", 7.0)];
        let fv = FeatureVector::new(BodySystem::Brain)
            .with("BlurredVision", 1)
            .with("StressLevel", 6);
        assert!(!Condition::All(BOTH).holds(&fv));
        assert!(Condition::Any(BOTH).holds(&fv));
    }
}
