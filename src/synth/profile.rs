//! Per-field sampling distributions for the classifier systems.

use crate::error::{Result, RiskError};
use crate::features::{BodySystem, FeatureValue, FieldKind};
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;
use statrs::distribution::Normal;

#[derive(Debug, Clone, Copy)]
pub enum Distribution {
    /// Uniform integer in `[low, high)`.
    UniformInt { low: i64, high: i64 },
    /// Normal draw clipped to `[clip_low, clip_high]`.
    Normal {
        mean: f64,
        std_dev: f64,
        clip_low: f64,
        clip_high: f64,
    },
    /// Weighted choice among category values.
    Categorical(&'static [(&'static str, f64)]),
    /// Flag set with probability `p`.
    Bernoulli(f64),
}

impl Distribution {
    /// Draw one value shaped for `kind`: integer fields round normal draws,
    /// flag fields turn numeric draws into 0/1.
    pub fn sample<R: Rng>(&self, rng: &mut R, kind: &FieldKind) -> Result<FeatureValue> {
        let raw = match *self {
            Distribution::UniformInt { low, high } => {
                if low >= high {
                    return Err(RiskError::TrainingError(format!("empty integer range {}..{}", low, high)));
                }
                FeatureValue::Int(rng.gen_range(low..high))
            }
            Distribution::Normal {
                mean,
                std_dev,
                clip_low,
                clip_high,
            } => {
                let normal = Normal::new(mean, std_dev)
                    .map_err(|e| RiskError::TrainingError(format!("normal({}, {}): {}", mean, std_dev, e)))?;
                FeatureValue::Float(normal.sample(rng).clamp(clip_low, clip_high))
            }
            Distribution::Categorical(choices) => {
                let index = WeightedIndex::new(choices.iter().map(|(_, w)| *w))
                    .map_err(|e| RiskError::TrainingError(format!("categorical weights: {}", e)))?;
                FeatureValue::Category(choices[index.sample(rng)].0.to_string())
            }
            Distribution::Bernoulli(p) => {
                if !(0.0..=1.0).contains(&p) {
                    return Err(RiskError::TrainingError(format!("bernoulli p={} outside [0, 1]", p)));
                }
                FeatureValue::Flag(rng.gen_bool(p))
            }
        };
        Ok(match (kind, raw) {
            (FieldKind::Int { .. }, FeatureValue::Float(x)) => FeatureValue::Int(x.round() as i64),
            (FieldKind::Flag, FeatureValue::Int(v)) => FeatureValue::Flag(v != 0),
            (_, value) => value,
        })
    }
}

/// Field-by-field sampling plan for one system, in schema order.
#[derive(Debug)]
pub struct SamplingProfile {
    pub system: BodySystem,
    pub fields: &'static [(&'static str, Distribution)],
    /// Row count used when the config does not override it.
    pub default_samples: usize,
}

const SEX: Distribution = Distribution::Categorical(&[("Male", 0.5), ("Female", 0.5)]);

static BRAIN: SamplingProfile = SamplingProfile {
    system: BodySystem::Brain,
    fields: &[
        ("Age", Distribution::UniformInt { low: 30, high: 80 }),
        ("Sex", SEX),
        ("BP_Systolic", Distribution::UniformInt { low: 110, high: 200 }),
        ("BP_Diastolic", Distribution::UniformInt { low: 70, high: 120 }),
        ("RestingHR", Distribution::UniformInt { low: 55, high: 110 }),
        (
            "SpO2",
            Distribution::Normal {
                mean: 97.0,
                std_dev: 1.5,
                clip_low: 90.0,
                clip_high: 100.0,
            },
        ),
        ("FastingBloodSugar", Distribution::UniformInt { low: 70, high: 180 }),
        (
            "BMI",
            Distribution::Normal {
                mean: 26.0,
                std_dev: 4.0,
                clip_low: 16.0,
                clip_high: 40.0,
            },
        ),
        ("StressLevel", Distribution::UniformInt { low: 1, high: 11 }),
        ("Smokes", Distribution::Bernoulli(0.3)),
        ("BlurredVision", Distribution::Bernoulli(0.15)),
        ("FrequentHeadaches", Distribution::Bernoulli(0.2)),
        ("MobilityDizziness", Distribution::Bernoulli(0.1)),
        ("FamilyHistoryBrainEvent", Distribution::Bernoulli(0.25)),
    ],
    default_samples: 1200,
};

static HEART: SamplingProfile = SamplingProfile {
    system: BodySystem::Heart,
    fields: &[
        ("Age", Distribution::UniformInt { low: 30, high: 70 }),
        ("Sex", SEX),
        (
            "ChestPainType",
            Distribution::Categorical(&[("ATA", 0.2), ("NAP", 0.25), ("ASY", 0.4), ("TA", 0.15)]),
        ),
        ("RestingBP", Distribution::UniformInt { low: 100, high: 160 }),
        (
            "Cholesterol",
            Distribution::Normal {
                mean: 200.0,
                std_dev: 30.0,
                clip_low: 100.0,
                clip_high: 400.0,
            },
        ),
        ("FastingBS", Distribution::Bernoulli(0.2)),
        (
            "RestingECG",
            Distribution::Categorical(&[("Normal", 0.6), ("ST", 0.25), ("LVH", 0.15)]),
        ),
        ("MaxHR", Distribution::UniformInt { low: 120, high: 180 }),
        ("ExerciseAngina", Distribution::Categorical(&[("Y", 0.3), ("N", 0.7)])),
        (
            "Oldpeak",
            Distribution::Normal {
                mean: 1.0,
                std_dev: 1.0,
                clip_low: 0.0,
                clip_high: 6.0,
            },
        ),
        (
            "ST_Slope",
            Distribution::Categorical(&[("Up", 0.6), ("Flat", 0.3), ("Down", 0.1)]),
        ),
    ],
    default_samples: 1000,
};

impl SamplingProfile {
    pub fn for_system(system: BodySystem) -> Option<&'static SamplingProfile> {
        match system {
            BodySystem::Heart => Some(&HEART),
            BodySystem::Brain => Some(&BRAIN),
            _ => None,
        }
    }
}
