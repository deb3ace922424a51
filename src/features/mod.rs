//! Feature schema and per-request feature vectors.

mod schema;
mod system;

pub use schema::{FieldKind, FieldSpec, Schema};
pub use system::{BodySystem, Strategy};

use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One typed input value. Flags also accept integer 0/1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Int(i64),
    Float(f64),
    Category(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FeatureValue::Flag(b) => Some(*b),
            FeatureValue::Int(0) => Some(false),
            FeatureValue::Int(1) => Some(true),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(c) => Some(c),
            _ => None,
        }
    }

    /// Parse raw text (CSV cell, prompt answer) according to a field kind.
    pub fn parse(kind: &FieldKind, raw: &str) -> std::result::Result<Self, String> {
        let raw = raw.trim();
        match kind {
            FieldKind::Int { .. } => raw
                .parse::<i64>()
                .map(FeatureValue::Int)
                .map_err(|_| format!("`{}` is not an integer", raw)),
            FieldKind::Float { .. } => raw
                .parse::<f64>()
                .map(FeatureValue::Float)
                .map_err(|_| format!("`{}` is not a number", raw)),
            FieldKind::Flag => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "y" => Ok(FeatureValue::Flag(true)),
                "0" | "false" | "no" | "n" => Ok(FeatureValue::Flag(false)),
                _ => Err(format!("`{}` is not 0/1", raw)),
            },
            FieldKind::Categorical(_) => Ok(FeatureValue::Category(raw.to_string())),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Flag(b) => write!(f, "{}", u8::from(*b)),
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Category(c) => f.write_str(c),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Flag(v)
    }
}

impl From<i32> for FeatureValue {
    fn from(v: i32) -> Self {
        FeatureValue::Int(v.into())
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Category(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Category(v)
    }
}

/// One assessment request: named values in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub system: BodySystem,
    values: Vec<(String, FeatureValue)>,
}

impl FeatureVector {
    pub fn new(system: BodySystem) -> Self {
        Self {
            system,
            values: Vec::new(),
        }
    }

    /// Builder form of [`FeatureVector::set`].
    pub fn with(mut self, name: &str, value: impl Into<FeatureValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn set(&mut self, name: &str, value: impl Into<FeatureValue>) {
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FeatureValue> {
        let pos = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(pos).1)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_f64)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FeatureValue::as_flag)
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FeatureValue::as_category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build from a flat JSON object (`{"Age": 52, "Sex": "Male", ...}`).
    pub fn from_json(system: BodySystem, json: &serde_json::Value) -> Result<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| RiskError::violation(system, "<input>", "expected a JSON object"))?;
        let mut fv = FeatureVector::new(system);
        for (name, raw) in object {
            let value: FeatureValue = serde_json::from_value(raw.clone())
                .map_err(|e| RiskError::violation(system, name.as_str(), e.to_string()))?;
            fv.set(name, value);
        }
        Ok(fv)
    }

}
