//! Rule scoring benchmark: validate + weighted score for each rule-scored system.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitals_risk::features::{BodySystem, FeatureVector};
use vitals_risk::risk::{Evaluator, RuleEvaluator};
use vitals_risk::rules::ScoreTable;

fn kidney_input() -> FeatureVector {
    FeatureVector::new(BodySystem::Kidney)
        .with("Hypertension", true)
        .with("DiabetesMellitus", true)
        .with("Swelling", false)
        .with("ReducedUrination", true)
        .with("Fatigue", true)
        .with("BloodPressure", 150)
        .with("SerumCreatinine", 2.1)
        .with("Hemoglobin", 11.0)
        .with("AlbuminUrine", 3)
        .with("SugarUrine", 1)
}

fn bench_score_table(c: &mut Criterion) {
    let table = ScoreTable::for_system(BodySystem::Kidney).unwrap();
    let fv = kidney_input();

    c.bench_function("kidney_score_only", |b| b.iter(|| table.score(black_box(&fv))));
}

fn bench_rule_evaluate(c: &mut Criterion) {
    let evaluator = RuleEvaluator::for_system(BodySystem::Kidney).unwrap();
    let fv = kidney_input();

    c.bench_function("kidney_evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(&fv)).unwrap())
    });
}

criterion_group!(benches, bench_score_table, bench_rule_evaluate);
criterion_main!(benches);
