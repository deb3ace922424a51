//! Integration test: config load, rule systems through the engine, classifier
//! train/save/load/evaluate, artifact tampering, report export.

use std::path::Path;
use std::sync::Arc;
use vitals_risk::{
    config::PredictorConfig,
    features::{BodySystem, FeatureVector, Schema},
    model::{self, ClassifierPipeline, ForestParams},
    report,
    risk::{ClassifierEvaluator, Evaluator, RiskEngine, RiskTier, RuleEvaluator, SystemEvaluator},
    rules::ScoreTable,
    synth, RiskError,
};

fn small_forest() -> ForestParams {
    ForestParams {
        n_trees: 15,
        seed: 7,
        max_depth: Some(8),
        min_samples_split: 2,
    }
}

fn liver_scenario() -> FeatureVector {
    FeatureVector::new(BodySystem::Liver)
        .with("Fatigue", true)
        .with("Jaundice", true)
        .with("Nausea", false)
        .with("AbdominalSwelling", false)
        .with("AlcoholUse", false)
        .with("ALT", 60)
        .with("AST", 55)
        .with("Bilirubin", 1.5)
        .with("Albumin", 3.0)
}

fn diabetes_scenario() -> FeatureVector {
    FeatureVector::new(BodySystem::Diabetes)
        .with("FrequentUrination", false)
        .with("ExcessiveThirst", false)
        .with("UnexplainedWeightLoss", false)
        .with("BlurredVision", false)
        .with("SlowHealing", false)
        .with("FamilyHistory", false)
        .with("FBS", 110)
        .with("PPBS", 160)
        .with("HbA1c", 6.0)
}

fn brain_input() -> FeatureVector {
    FeatureVector::new(BodySystem::Brain)
        .with("Age", 58)
        .with("Sex", "Male")
        .with("BP_Systolic", 150)
        .with("BP_Diastolic", 95)
        .with("RestingHR", 88)
        .with("SpO2", 95.0)
        .with("FastingBloodSugar", 140)
        .with("BMI", 29.5)
        .with("StressLevel", 7)
        .with("Smokes", true)
        .with("BlurredVision", false)
        .with("FrequentHeadaches", true)
        .with("MobilityDizziness", false)
        .with("FamilyHistoryBrainEvent", false)
}

#[test]
fn config_load_default() {
    let c = PredictorConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.model_dir, Path::new("models"));
    assert_eq!(c.training.heart_samples, 1000);
    assert_eq!(c.training.brain_samples, 1200);
    assert_eq!(c.log.level, "info");
    assert!(!c.log.json);
}

#[test]
fn config_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"model_dir": "/srv/models", "log": {"json": true}}"#).unwrap();
    let c = PredictorConfig::load(&path);
    assert_eq!(c.model_dir, Path::new("/srv/models"));
    assert!(c.log.json);
    assert_eq!(c.log.level, "info");

    std::fs::write(&path, "not json").unwrap();
    let c = PredictorConfig::load(&path);
    assert_eq!(c.model_dir, Path::new("models"));
}

#[test]
fn liver_scenario_is_high() {
    let engine = RiskEngine::from_model_dir(Path::new("nonexistent-models"));
    let a = engine.evaluate(&liver_scenario()).unwrap();
    assert_eq!(a.score, Some(7));
    assert_eq!(a.tier, RiskTier::High);
    assert_eq!(a.label, "High");
}

#[test]
fn diabetes_scenario_is_low() {
    let engine = RiskEngine::from_model_dir(Path::new("nonexistent-models"));
    let a = engine.evaluate(&diabetes_scenario()).unwrap();
    assert_eq!(a.score, Some(0));
    assert_eq!(a.tier, RiskTier::Low);
}

#[test]
fn brain_without_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let engine = RiskEngine::from_model_dir(dir.path());
    let err = engine.evaluate(&brain_input()).unwrap_err();
    assert!(matches!(err, RiskError::ModelUnavailable { system: BodySystem::Brain, .. }));
}

#[test]
fn score_is_monotone_under_flag_flips() {
    for system in [BodySystem::Lungs, BodySystem::Liver, BodySystem::Kidney, BodySystem::Diabetes] {
        let table = ScoreTable::for_system(system).unwrap();
        let base_fv = match system {
            BodySystem::Liver => liver_scenario(),
            BodySystem::Diabetes => diabetes_scenario(),
            _ => all_clear(system),
        };
        let base = table.score(&base_fv).score;
        for field in Schema::for_system(system).fields {
            if base_fv.flag(field.name) == Some(false) {
                let mut flipped = base_fv.clone();
                flipped.set(field.name, true);
                assert!(
                    table.score(&flipped).score >= base,
                    "{} flip of {} lowered the score",
                    system,
                    field.name
                );
            }
        }
    }
}

/// Every flag off, numerics at the benign end of their domain.
fn all_clear(system: BodySystem) -> FeatureVector {
    use vitals_risk::features::FieldKind;
    let mut fv = FeatureVector::new(system);
    for field in Schema::for_system(system).fields {
        match field.kind {
            FieldKind::Flag => fv.set(field.name, false),
            FieldKind::Int { min, .. } => fv.set(field.name, min),
            FieldKind::Float { max, .. } if field.name == "SpO2" => fv.set(field.name, max),
            FieldKind::Float { min, .. } => fv.set(field.name, min),
            FieldKind::Categorical(values) => fv.set(field.name, values[0]),
        }
    }
    fv
}

#[test]
fn trained_classifier_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = model::train_and_save(BodySystem::Brain, 300, 11, small_forest(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("brain_model.json"));

    let engine = RiskEngine::from_model_dir(dir.path());
    assert!(engine.is_available(BodySystem::Brain));
    let a = engine.evaluate(&brain_input()).unwrap();
    let probabilities = a.probabilities.as_ref().unwrap();
    let total: f64 = probabilities.values().sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert!(BodySystem::Brain.labels().contains(&a.label.as_str()));
    assert!(a.score.is_none());
    assert!(a.confidence().unwrap() > 0.0);

    // reloaded pipeline predicts exactly what the in-memory one does
    let dataset = synth::generate(BodySystem::Brain, 300, 11).unwrap();
    let fitted = ClassifierPipeline::fit(&dataset, small_forest()).unwrap();
    let loaded = ClassifierPipeline::load(BodySystem::Brain, &path).unwrap();
    let fv = brain_input();
    assert_eq!(fitted.predict_proba(&fv).unwrap(), loaded.predict_proba(&fv).unwrap());
}

#[test]
fn in_memory_evaluator_can_be_injected() {
    let dataset = synth::generate(BodySystem::Heart, 200, 3).unwrap();
    let pipeline = ClassifierPipeline::fit(&dataset, small_forest()).unwrap();
    let engine = RiskEngine::from_model_dir(Path::new("nonexistent-models")).with_evaluator(
        SystemEvaluator::Classifier(ClassifierEvaluator::new(Arc::new(pipeline))),
    );
    assert!(engine.is_available(BodySystem::Heart));
    let fv = FeatureVector::new(BodySystem::Heart)
        .with("Age", 61)
        .with("Sex", "Female")
        .with("ChestPainType", "ASY")
        .with("RestingBP", 160)
        .with("Cholesterol", 280)
        .with("FastingBS", true)
        .with("RestingECG", "ST")
        .with("MaxHR", 118)
        .with("ExerciseAngina", "Y")
        .with("Oldpeak", 2.8)
        .with("ST_Slope", "Down");
    let a = engine.evaluate(&fv).unwrap();
    assert!(BodySystem::Heart.labels().contains(&a.label.as_str()));
}

#[test]
fn tampered_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = model::train_and_save(BodySystem::Brain, 150, 5, small_forest(), dir.path()).unwrap();
    let mut artifact: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    artifact["classes"][0] = serde_json::Value::String("Healthy".into());
    std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();

    let err = ClassifierPipeline::load(BodySystem::Brain, &path).unwrap_err();
    assert!(err.is_model_unavailable());
    let engine = RiskEngine::from_model_dir(dir.path());
    assert!(!engine.is_available(BodySystem::Brain));
}

#[test]
fn artifact_for_wrong_system_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = model::train_and_save(BodySystem::Brain, 150, 5, small_forest(), dir.path()).unwrap();
    assert!(ClassifierEvaluator::load(BodySystem::Heart, &path).is_err());
}

#[test]
fn report_contains_inputs_and_insights() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("liver.md");
    let fv = liver_scenario();
    let a = RuleEvaluator::for_system(BodySystem::Liver).unwrap().evaluate(&fv).unwrap();
    report::write_report(&path, &fv, &a, true).unwrap();
    let md = std::fs::read_to_string(&path).unwrap();
    assert!(md.contains("| ALT | 60 |"));
    assert!(md.contains("Jaundice (yellowing of skin or eyes)"));
    assert!(md.contains(a.headline));
}

#[test]
fn invalid_input_is_schema_violation() {
    let engine = RiskEngine::from_model_dir(Path::new("nonexistent-models"));
    let fv = liver_scenario().with("ALT", -5);
    let err = engine.evaluate(&fv).unwrap_err();
    assert!(matches!(err, RiskError::SchemaViolation { .. }));
    let fv = diabetes_scenario().with("Insulin", 12);
    assert!(engine.evaluate(&fv).is_err());
}
