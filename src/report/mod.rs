//! Markdown export of one assessment.

use std::fmt::Write;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::explain::DISCLAIMER;
use crate::features::{FeatureVector, Schema};
use crate::risk::RiskAssessment;

pub fn render_markdown(features: &FeatureVector, assessment: &RiskAssessment, include_advice: bool) -> String {
    let mut output = String::new();
    let system = assessment.system;

    let _ = writeln!(output, "# {} Risk Report", system.display_name());
    let _ = writeln!(
        output,
        "Generated {} (assessment {})",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        assessment.id
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Inputs");
    let _ = writeln!(output, "| Field | Value |");
    let _ = writeln!(output, "|---|---|");
    for field in Schema::for_system(system).fields {
        let value = features
            .get(field.name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(output, "| {} | {} |", field.name, value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Result");
    let _ = writeln!(output, "**{}** ({})", assessment.tier, assessment.label);
    let _ = writeln!(output, "{}", assessment.headline);
    if let Some(score) = assessment.score {
        let _ = writeln!(output, "- Score: {}", score);
    }
    if let Some(probabilities) = &assessment.probabilities {
        for label in system.labels() {
            let p = probabilities.get(label).copied().unwrap_or(0.0);
            let _ = writeln!(output, "- {}: {:.2}%", label, p * 100.0);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");
    for insight in &assessment.insights {
        let _ = writeln!(output, "- {}", insight);
    }

    if include_advice {
        let advice = assessment.advice;
        let _ = writeln!(output);
        let _ = writeln!(output, "## Advice");
        for tip in advice.tips {
            let _ = writeln!(output, "- {}", tip);
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "Recommended tests: {}", advice.tests.join(", "));
        let _ = writeln!(output, "See a doctor: {}", advice.urgency);
        let _ = writeln!(output, "What to say: \"{}\"", advice.doctor_prompt);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "_{}_", DISCLAIMER);
    output
}

/// Render and write the report, creating parent directories.
pub fn write_report(
    path: &Path,
    features: &FeatureVector,
    assessment: &RiskAssessment,
    include_advice: bool,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_markdown(features, assessment, include_advice))?;
    info!(path = %path.display(), system = %assessment.system, "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::BodySystem;
    use crate::risk::{Evaluator, RuleEvaluator};

    fn liver() -> FeatureVector {
        FeatureVector::new(BodySystem::Liver)
            .with("Fatigue", true)
            .with("Jaundice", true)
            .with("Nausea", false)
            .with("AbdominalSwelling", false)
            .with("AlcoholUse", true)
            .with("ALT", 80)
            .with("AST", 40)
            .with("Bilirubin", 1.5)
            .with("Albumin", 3.8)
    }

    #[test]
    fn report_echoes_inputs_in_schema_order() {
        let fv = liver();
        let a = RuleEvaluator::for_system(BodySystem::Liver).unwrap().evaluate(&fv).unwrap();
        let md = render_markdown(&fv, &a, true);
        assert!(md.starts_with("# Liver Risk Report"));
        let fatigue = md.find("| Fatigue | 1 |").unwrap();
        let albumin = md.find("| Albumin | 3.8 |").unwrap();
        assert!(fatigue < albumin);
        assert!(md.contains("**HIGH** (High)"));
        assert!(md.contains("- Score: 7"));
        assert!(md.contains("## Advice"));
        assert!(md.contains(DISCLAIMER));
    }

    #[test]
    fn advice_can_be_omitted() {
        let fv = liver();
        let a = RuleEvaluator::for_system(BodySystem::Liver).unwrap().evaluate(&fv).unwrap();
        let md = render_markdown(&fv, &a, false);
        assert!(!md.contains("## Advice"));
        assert!(md.contains("## Insights"));
    }
}
