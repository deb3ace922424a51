//! Column transformer: standardize numeric fields, one-hot encode
//! categorical and flag fields with the first category dropped.

use crate::error::{Result, RiskError};
use crate::features::{BodySystem, FeatureValue, FeatureVector, FieldKind, Schema};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Column {
    Numeric { field: String, mean: f64, scale: f64 },
    /// One output per kept category; the dropped reference encodes as all zeros.
    OneHot {
        field: String,
        dropped: String,
        kept: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub system: BodySystem,
    pub columns: Vec<Column>,
}

/// Category key used for encoding; flags become "0"/"1".
fn category_key(kind: &FieldKind, value: &FeatureValue) -> Option<String> {
    match kind {
        FieldKind::Flag => value.as_flag().map(|b| if b { "1" } else { "0" }.to_string()),
        FieldKind::Categorical(_) => value.as_category().map(str::to_string),
        _ => None,
    }
}

impl Preprocessor {
    /// Learn column statistics from the training rows.
    pub fn fit(system: BodySystem, rows: &[&FeatureVector]) -> Result<Self> {
        if rows.is_empty() {
            return Err(RiskError::TrainingError("cannot fit preprocessor on zero rows".into()));
        }
        let schema = Schema::for_system(system);
        let mut columns = Vec::with_capacity(schema.fields.len());

        for spec in schema.fields {
            if spec.kind.is_numeric() {
                let mut values = Vec::with_capacity(rows.len());
                for (i, fv) in rows.iter().enumerate() {
                    let x = fv.numeric(spec.name).ok_or_else(|| {
                        RiskError::TrainingError(format!("row {}: numeric field `{}` missing", i, spec.name))
                    })?;
                    if !x.is_finite() {
                        return Err(RiskError::TrainingError(format!(
                            "row {}: field `{}` is not finite",
                            i, spec.name
                        )));
                    }
                    values.push(x);
                }
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                columns.push(Column::Numeric {
                    field: spec.name.to_string(),
                    mean,
                    scale: if std > 0.0 { std } else { 1.0 },
                });
            } else if let Some(categories) = spec.kind.categories() {
                for (i, fv) in rows.iter().enumerate() {
                    let value = fv.get(spec.name).ok_or_else(|| {
                        RiskError::TrainingError(format!("row {}: field `{}` missing", i, spec.name))
                    })?;
                    match category_key(&spec.kind, value) {
                        Some(key) if categories.contains(&key.as_str()) => {}
                        _ => {
                            return Err(RiskError::TrainingError(format!(
                                "row {}: field `{}` has unexpected value `{}` (expected {})",
                                i,
                                spec.name,
                                value,
                                categories.join("/")
                            )))
                        }
                    }
                }
                columns.push(Column::OneHot {
                    field: spec.name.to_string(),
                    dropped: categories[0].to_string(),
                    kept: categories[1..].iter().map(|c| c.to_string()).collect(),
                });
            }
        }
        Ok(Self { system, columns })
    }

    /// Number of encoded features.
    pub fn width(&self) -> usize {
        self.columns
            .iter()
            .map(|c| match c {
                Column::Numeric { .. } => 1,
                Column::OneHot { kept, .. } => kept.len(),
            })
            .sum()
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        for c in &self.columns {
            match c {
                Column::Numeric { field, .. } => names.push(field.clone()),
                Column::OneHot { field, kept, .. } => {
                    names.extend(kept.iter().map(|k| format!("{}_{}", field, k)));
                }
            }
        }
        names
    }

    fn encode_into(&self, fv: &FeatureVector, out: &mut Vec<f64>) -> Result<()> {
        let schema = Schema::for_system(self.system);
        for c in &self.columns {
            match c {
                Column::Numeric { field, mean, scale } => {
                    let x = fv
                        .numeric(field)
                        .ok_or_else(|| RiskError::violation(self.system, field.as_str(), "missing numeric value"))?;
                    out.push((x - mean) / scale);
                }
                Column::OneHot { field, dropped, kept } => {
                    let kind = schema
                        .field(field)
                        .map(|s| s.kind)
                        .ok_or_else(|| RiskError::violation(self.system, field.as_str(), "not in schema"))?;
                    let key = fv
                        .get(field)
                        .and_then(|v| category_key(&kind, v))
                        .ok_or_else(|| RiskError::violation(self.system, field.as_str(), "missing category"))?;
                    if key != *dropped && !kept.contains(&key) {
                        return Err(RiskError::violation(
                            self.system,
                            field.as_str(),
                            format!("unknown category `{}`", key),
                        ));
                    }
                    out.extend(kept.iter().map(|k| if *k == key { 1.0 } else { 0.0 }));
                }
            }
        }
        Ok(())
    }

    /// Encode rows into an `(n, width)` matrix.
    pub fn transform(&self, rows: &[&FeatureVector]) -> Result<Array2<f64>> {
        let width = self.width();
        let mut flat = Vec::with_capacity(rows.len() * width);
        for fv in rows {
            self.encode_into(fv, &mut flat)?;
        }
        Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| RiskError::TrainingError(format!("encoded shape: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart_row(age: i64, sex: &str, slope: &str, fbs: bool) -> FeatureVector {
        FeatureVector::new(BodySystem::Heart)
            .with("Age", age)
            .with("Sex", sex)
            .with("ChestPainType", "ATA")
            .with("RestingBP", 120)
            .with("Cholesterol", 200)
            .with("FastingBS", fbs)
            .with("RestingECG", "Normal")
            .with("MaxHR", 150)
            .with("ExerciseAngina", "N")
            .with("Oldpeak", 1.0)
            .with("ST_Slope", slope)
    }

    #[test]
    fn standardizes_and_drops_first_category() {
        let a = heart_row(40, "Male", "Up", false);
        let b = heart_row(60, "Female", "Down", true);
        let pre = Preprocessor::fit(BodySystem::Heart, &[&a, &b]).unwrap();
        // 5 numeric + Sex(1) + ChestPain(3) + FastingBS(1) + ECG(2) + Angina(1) + Slope(2)
        assert_eq!(pre.width(), 15);

        let x = pre.transform(&[&a, &b]).unwrap();
        assert_eq!(x.dim(), (2, 15));
        // Age mean 50, population std 10
        assert!((x[[0, 0]] + 1.0).abs() < 1e-12);
        assert!((x[[1, 0]] - 1.0).abs() < 1e-12);
        // constant RestingBP column keeps scale 1 and centres to zero
        let bp = pre.feature_names().iter().position(|n| n == "RestingBP").unwrap();
        assert_eq!(x[[0, bp]], 0.0);
        assert_eq!(x[[1, bp]], 0.0);

        let names = pre.feature_names();
        let sex = names.iter().position(|n| n == "Sex_Female").unwrap();
        assert_eq!(x[[0, sex]], 0.0);
        assert_eq!(x[[1, sex]], 1.0);
        let down = names.iter().position(|n| n == "ST_Slope_Down").unwrap();
        assert_eq!(x[[1, down]], 1.0);
        assert!(!names.iter().any(|n| n == "ST_Slope_Up"));
    }

    #[test]
    fn foreign_category_fails_fit() {
        let a = heart_row(40, "Male", "Up", false);
        let b = heart_row(60, "Female", "Sideways", true);
        let err = Preprocessor::fit(BodySystem::Heart, &[&a, &b]).unwrap_err();
        assert!(matches!(err, RiskError::TrainingError(_)));
    }

    #[test]
    fn empty_rows_fail_fit() {
        assert!(Preprocessor::fit(BodySystem::Heart, &[]).is_err());
    }
}
