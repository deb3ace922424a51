//! Log setup plus one-JSON-object-per-line assessment records for audit.

use crate::risk::RiskAssessment;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Compact audit line for one assessment (no input values).
#[derive(Serialize)]
pub struct AssessmentLog<'a> {
    pub ts: String,
    pub assessment_id: &'a str,
    pub system: &'a str,
    pub tier: String,
    pub label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl<'a> AssessmentLog<'a> {
    pub fn from_assessment(a: &'a RiskAssessment) -> Self {
        Self {
            ts: a.assessed_at.to_rfc3339(),
            assessment_id: &a.id,
            system: a.system.as_str(),
            tier: a.tier.to_string(),
            label: &a.label,
            score: a.score,
            confidence: a.confidence(),
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber on stderr; RUST_LOG overrides `default_level`.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            if let Err(e) = tracing_subscriber::registry().with(filter).with(fmt).try_init() {
                tracing::debug!(error = %e, "subscriber already installed; keeping it");
            }
        } else {
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init();
            if let Err(e) = installed {
                tracing::debug!(error = %e, "subscriber already installed; keeping it");
            }
        }
    }

    /// Write one serialized record followed by a newline.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
