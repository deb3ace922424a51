//! Structured logging.

mod format;

pub use format::{AssessmentLog, StructuredLogger};
