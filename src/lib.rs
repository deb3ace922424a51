//! Vitals Risk: per-organ health risk tiers from self-reported vitals.
//!
//! Modular structure:
//! - [`features`]: Body systems, field schemas, feature vectors
//! - [`rules`]: Weighted score tables and synthetic-label guard chains
//! - [`synth`]: Seeded synthetic training data
//! - [`model`]: Preprocessing + random forest classifier artifacts
//! - [`risk`]: Evaluators and the risk engine
//! - [`explain`]: Canned insights and advice per tier
//! - [`report`]: Markdown report export
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod logging;
pub mod model;
pub mod report;
pub mod risk;
pub mod rules;
pub mod synth;

pub use config::PredictorConfig;
pub use error::{Result, RiskError};
pub use features::{BodySystem, FeatureValue, FeatureVector, Schema};
pub use logging::StructuredLogger;
pub use model::ClassifierPipeline;
pub use risk::{Evaluator, RiskAssessment, RiskEngine, RiskTier};
