//! Structured JSON report documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReportBody, ReportMeta};
use crate::domain::{Building, ValidatedProperty};
use crate::infrastructure::report_writer::ReportError;

/// Buildings document as written to `suumo_properties.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub buildings: Vec<Building>,
}

/// Validated properties document as written to `results_<timestamp>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub properties: Vec<ValidatedProperty>,
}

#[derive(Serialize)]
struct Document<'a> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: ReportBody<'a>,
}

pub fn render(meta: &ReportMeta, body: ReportBody<'_>) -> Result<String, ReportError> {
    let document = Document {
        title: &meta.title,
        generated_at: meta.generated_at,
        body,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
