//! Seeded synthetic training data: sample each field independently, then
//! label the row with the system's guard chain.

mod profile;

pub use profile::{Distribution, SamplingProfile};

use crate::error::{Result, RiskError};
use crate::features::{BodySystem, FeatureValue, FeatureVector, Schema};
use crate::rules::GuardChain;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Column holding the label in CSV exports.
pub const LABEL_COLUMN: &str = "Label";

/// Labeled rows for one system.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    pub system: BodySystem,
    rows: Vec<(FeatureVector, String)>,
}

impl TrainingDataset {
    pub fn new(system: BodySystem) -> Self {
        Self {
            system,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, features: FeatureVector, label: impl Into<String>) {
        self.rows.push((features, label.into()));
    }

    pub fn rows(&self) -> &[(FeatureVector, String)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, label) in &self.rows {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Header is the schema field order followed by `Label`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let schema = Schema::for_system(self.system);
        let mut w = csv::Writer::from_writer(writer);
        let mut header: Vec<&str> = schema.field_names().collect();
        header.push(LABEL_COLUMN);
        w.write_record(&header)?;
        for (fv, label) in &self.rows {
            let mut record: Vec<String> = schema
                .fields
                .iter()
                .map(|f| fv.get(f.name).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            record.push(label.clone());
            w.write_record(&record)?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Load a dataset produced elsewhere. Cells are typed by the schema but
    /// not domain-checked; the trainer rejects foreign categories itself.
    pub fn read_csv<R: Read>(system: BodySystem, reader: R) -> Result<Self> {
        let schema = Schema::for_system(system);
        let mut r = csv::Reader::from_reader(reader);
        let headers = r.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| RiskError::TrainingError(format!("missing `{}` column", LABEL_COLUMN)))?;

        let mut dataset = TrainingDataset::new(system);
        for (line, record) in r.records().enumerate() {
            let record = record?;
            let mut fv = FeatureVector::new(system);
            for (idx, header) in headers.iter().enumerate() {
                if idx == label_idx {
                    continue;
                }
                let spec = schema.field(header).ok_or_else(|| {
                    RiskError::TrainingError(format!("column `{}` is not a {} field", header, system))
                })?;
                let cell = record.get(idx).unwrap_or_default();
                let value = FeatureValue::parse(&spec.kind, cell)
                    .map_err(|e| RiskError::TrainingError(format!("row {}: {}: {}", line + 1, header, e)))?;
                fv.set(spec.name, value);
            }
            let label = record.get(label_idx).unwrap_or_default().to_string();
            dataset.push(fv, label);
        }
        Ok(dataset)
    }
}

/// Generate `n` labeled rows. The same `(system, n, seed)` always yields the
/// same dataset.
pub fn generate(system: BodySystem, n: usize, seed: u64) -> Result<TrainingDataset> {
    let profile = SamplingProfile::for_system(system)
        .ok_or_else(|| RiskError::TrainingError(format!("no sampling profile for {}", system)))?;
    let chain = GuardChain::for_system(system)
        .ok_or_else(|| RiskError::TrainingError(format!("no label rules for {}", system)))?;
    let schema = Schema::for_system(system);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut dataset = TrainingDataset::new(system);
    for _ in 0..n {
        let mut fv = FeatureVector::new(system);
        for (name, dist) in profile.fields {
            let spec = schema
                .field(name)
                .ok_or_else(|| RiskError::TrainingError(format!("profile field `{}` not in schema", name)))?;
            fv.set(name, dist.sample(&mut rng, &spec.kind)?);
        }
        let label = chain.label(&fv);
        dataset.push(fv, label);
    }
    tracing::debug!(%system, n, seed, labels = ?dataset.label_counts(), "generated synthetic dataset");
    Ok(dataset)
}
