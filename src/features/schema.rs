//! Per-system field declarations and input validation.

use super::{BodySystem, FeatureValue, FeatureVector};
use crate::error::{Result, RiskError};

/// Domain of a single input field. Numeric ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Categorical(&'static [&'static str]),
    /// Boolean carried as 0/1.
    Flag,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int { .. } | FieldKind::Float { .. })
    }

    /// Categories for one-hot encoding; flags encode as "0"/"1".
    pub fn categories(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldKind::Categorical(values) => Some(values),
            FieldKind::Flag => Some(&["0", "1"]),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FieldKind::Int { min, max } => format!("integer {}-{}", min, max),
            FieldKind::Float { min, max } => format!("number {}-{}", min, max),
            FieldKind::Categorical(values) => values.join("/"),
            FieldKind::Flag => "0 = No, 1 = Yes".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Question shown by the interactive prompt.
    pub prompt: &'static str,
}

impl FieldSpec {
    /// Parse raw text and check it against the field's domain.
    pub fn parse_checked(&self, raw: &str) -> std::result::Result<FeatureValue, String> {
        let value = FeatureValue::parse(&self.kind, raw)?;
        check_domain(self, &value)?;
        Ok(value)
    }
}

const fn int(name: &'static str, min: i64, max: i64, prompt: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Int { min, max }, prompt }
}

const fn float(name: &'static str, min: f64, max: f64, prompt: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Float { min, max }, prompt }
}

const fn cat(name: &'static str, values: &'static [&'static str], prompt: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Categorical(values), prompt }
}

const fn flag(name: &'static str, prompt: &'static str) -> FieldSpec {
    FieldSpec { name, kind: FieldKind::Flag, prompt }
}

const SEX: &[&str] = &["Male", "Female"];

static HEART_FIELDS: &[FieldSpec] = &[
    int("Age", 20, 100, "Age (years)"),
    cat("Sex", SEX, "Sex"),
    cat("ChestPainType", &["ATA", "NAP", "ASY", "TA"], "Chest pain type"),
    int("RestingBP", 80, 200, "Resting blood pressure (mm Hg)"),
    int("Cholesterol", 100, 400, "Cholesterol (mg/dL)"),
    flag("FastingBS", "Fasting blood sugar > 120 mg/dL?"),
    cat("RestingECG", &["Normal", "ST", "LVH"], "Resting ECG"),
    int("MaxHR", 60, 220, "Max heart rate"),
    cat("ExerciseAngina", &["Y", "N"], "Exercise-induced angina?"),
    float("Oldpeak", 0.0, 6.0, "Oldpeak (ST depression)"),
    cat("ST_Slope", &["Up", "Flat", "Down"], "ST slope"),
];

static BRAIN_FIELDS: &[FieldSpec] = &[
    int("Age", 18, 100, "Age (years)"),
    cat("Sex", SEX, "Sex"),
    int("BP_Systolic", 90, 200, "Systolic BP (top number)"),
    int("BP_Diastolic", 60, 140, "Diastolic BP (bottom number)"),
    int("RestingHR", 40, 120, "Resting heart rate (beats/min)"),
    float("SpO2", 85.0, 100.0, "Oxygen saturation (SpO2 %)"),
    int("FastingBloodSugar", 70, 300, "Fasting blood sugar (mg/dL)"),
    float("BMI", 10.0, 45.0, "BMI (body mass index)"),
    int("StressLevel", 1, 10, "Stress level (1 to 10)"),
    flag("Smokes", "Do you smoke?"),
    flag("BlurredVision", "Do you get blurred vision often?"),
    flag("FrequentHeadaches", "Do you have frequent headaches?"),
    flag("MobilityDizziness", "Do you feel dizzy during walking or stairs?"),
    flag("FamilyHistoryBrainEvent", "Family history of brain stroke/death?"),
];

static LUNGS_FIELDS: &[FieldSpec] = &[
    flag("ChronicCough", "Persistent cough for more than 3 weeks?"),
    flag("ShortnessOfBreath", "Short of breath during light activity?"),
    flag("Wheezing", "Wheezing or whistling when breathing?"),
    flag("ChestTightness", "Chest tightness?"),
    flag("AsthmaHistory", "History of asthma?"),
    flag("Smoker", "Do you smoke?"),
    flag("PollutantExposure", "Exposed to dust, smoke or pollutants recently?"),
    int("CoughsPerDay", 0, 100, "Cough episodes per day"),
    int("BreathlessnessScore", 1, 10, "Shortness of breath (1-10)"),
    float("SpO2", 80.0, 100.0, "Oxygen saturation (SpO2 %)"),
];

static LIVER_FIELDS: &[FieldSpec] = &[
    flag("Fatigue", "Persistent fatigue?"),
    flag("Jaundice", "Yellowing of skin or eyes?"),
    flag("Nausea", "Frequent nausea?"),
    flag("AbdominalSwelling", "Swelling in the abdomen?"),
    flag("AlcoholUse", "Regular alcohol use?"),
    int("ALT", 10, 200, "ALT (U/L)"),
    int("AST", 10, 200, "AST (U/L)"),
    float("Bilirubin", 0.0, 10.0, "Total bilirubin (mg/dL)"),
    float("Albumin", 2.0, 6.0, "Albumin (g/dL)"),
];

static KIDNEY_FIELDS: &[FieldSpec] = &[
    flag("Hypertension", "Diagnosed with hypertension?"),
    flag("DiabetesMellitus", "Diagnosed with diabetes mellitus?"),
    flag("Swelling", "Swelling in feet, ankles or face?"),
    flag("ReducedUrination", "Noticeably reduced urination?"),
    flag("Fatigue", "Persistent fatigue?"),
    int("BloodPressure", 60, 200, "Blood pressure (mm Hg)"),
    float("SerumCreatinine", 0.5, 10.0, "Serum creatinine (mg/dL)"),
    float("Hemoglobin", 8.0, 18.0, "Hemoglobin (g/dL)"),
    int("AlbuminUrine", 0, 5, "Albumin in urine (0-5)"),
    int("SugarUrine", 0, 5, "Sugar in urine (0-5)"),
];

static DIABETES_FIELDS: &[FieldSpec] = &[
    flag("FrequentUrination", "Frequent urination?"),
    flag("ExcessiveThirst", "Excessive thirst?"),
    flag("UnexplainedWeightLoss", "Unexplained weight loss?"),
    flag("BlurredVision", "Blurred vision?"),
    flag("SlowHealing", "Slow-healing cuts or sores?"),
    flag("FamilyHistory", "Family history of diabetes?"),
    int("FBS", 50, 300, "Fasting blood sugar (mg/dL)"),
    int("PPBS", 70, 400, "Post-meal blood sugar (mg/dL)"),
    float("HbA1c", 3.0, 15.0, "HbA1c (%)"),
];

/// Ordered field set accepted for one system.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub system: BodySystem,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn for_system(system: BodySystem) -> Self {
        let fields = match system {
            BodySystem::Heart => HEART_FIELDS,
            BodySystem::Brain => BRAIN_FIELDS,
            BodySystem::Lungs => LUNGS_FIELDS,
            BodySystem::Liver => LIVER_FIELDS,
            BodySystem::Kidney => KIDNEY_FIELDS,
            BodySystem::Diabetes => DIABETES_FIELDS,
        };
        Self { system, fields }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Reject vectors with missing, unknown, mistyped or out-of-domain fields.
    pub fn validate(&self, features: &FeatureVector) -> Result<()> {
        if features.system != self.system {
            return Err(RiskError::violation(
                self.system,
                "<system>",
                format!("vector belongs to {}", features.system),
            ));
        }
        for (name, _) in features.iter() {
            if self.field(name).is_none() {
                return Err(RiskError::violation(self.system, name, "unknown field"));
            }
        }
        for spec in self.fields {
            let value = features
                .get(spec.name)
                .ok_or_else(|| RiskError::violation(self.system, spec.name, "missing required field"))?;
            check_domain(spec, value).map_err(|reason| RiskError::violation(self.system, spec.name, reason))?;
        }
        Ok(())
    }
}

fn check_domain(spec: &FieldSpec, value: &FeatureValue) -> std::result::Result<(), String> {
    match (spec.kind, value) {
        (FieldKind::Int { min, max }, FeatureValue::Int(v)) => {
            if (min..=max).contains(v) {
                Ok(())
            } else {
                Err(format!("{} outside {}..={}", v, min, max))
            }
        }
        (FieldKind::Float { min, max }, v @ (FeatureValue::Int(_) | FeatureValue::Float(_))) => {
            let x = v.as_f64().unwrap_or(f64::NAN);
            if (min..=max).contains(&x) {
                Ok(())
            } else {
                Err(format!("{} outside {}..={}", x, min, max))
            }
        }
        (FieldKind::Categorical(values), FeatureValue::Category(c)) => {
            if values.contains(&c.as_str()) {
                Ok(())
            } else {
                Err(format!("`{}` not one of {}", c, values.join(", ")))
            }
        }
        (FieldKind::Flag, v) if v.as_flag().is_some() => Ok(()),
        (kind, v) => Err(format!("expected {}, got {}", kind.describe(), v)),
    }
}
