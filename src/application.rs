//! Application layer module
//!
//! Orchestrates a run: the scrape pipeline, the validation filter, the
//! projection of building/unit pairs into properties, and report rendering.

pub mod pipeline;
pub mod projection;
pub mod reporting;
pub mod validation;

pub use pipeline::{FailureStage, PageFailure, RunOutcome, RunStats, ScrapePipeline};
pub use projection::{DetailIndex, PropertyProjector};
pub use reporting::{ReportBody, ReportMeta, WrittenReports, write_reports};
pub use validation::{PropertyCandidate, Rejection, ValidationFilter};
