//! Error taxonomy shared by schema validation, training and evaluation.

use crate::features::BodySystem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    /// Input field missing, of the wrong type, or outside its declared domain.
    #[error("schema violation for {system} field `{field}`: {reason}")]
    SchemaViolation {
        system: BodySystem,
        field: String,
        reason: String,
    },
    /// Classifier artifact missing, unreadable or corrupt.
    #[error("model unavailable for {system}: {reason}")]
    ModelUnavailable { system: BodySystem, reason: String },
    /// Empty or malformed training data.
    #[error("training error: {0}")]
    TrainingError(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl RiskError {
    pub fn violation(
        system: BodySystem,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RiskError::SchemaViolation {
            system,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(system: BodySystem, reason: impl Into<String>) -> Self {
        RiskError::ModelUnavailable {
            system,
            reason: reason.into(),
        }
    }

    /// True for errors the caller should surface as a disabled/simulated result.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, RiskError::ModelUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, RiskError>;
