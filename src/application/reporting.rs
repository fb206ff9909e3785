//! Report projection into JSON, Markdown, HTML and a console summary
//!
//! Every renderer is a pure function of the report metadata and the record
//! set, so the same run always produces the same files.

pub mod html;
pub mod json;
pub mod markdown;
pub mod summary;

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Building, Floor, Unit, ValidatedProperty};
use crate::infrastructure::report_writer::{OutputWriter, ReportError};

pub use json::{ListingReport, ValidatedReport};

/// Rendered in place of any missing value
pub const PLACEHOLDER: &str = "N/A";

pub const LISTING_REPORT_STEM: &str = "suumo_properties";

/// Run-level report metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub title: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
        }
    }

    /// `results_<YYYYMMDD_HHMMSS>.json`, local time
    pub fn results_file_name(&self) -> String {
        format!(
            "results_{}.json",
            self.generated_at.with_timezone(&Local).format("%Y%m%d_%H%M%S")
        )
    }
}

/// Record set rendered by one report
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportBody<'a> {
    Buildings(&'a [Building]),
    Properties(&'a [ValidatedProperty]),
}

/// Paths of one run's report files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub html: PathBuf,
    pub results: PathBuf,
}

/// Render and write the three building reports plus the validated results
pub async fn write_reports(
    writer: &OutputWriter,
    meta: &ReportMeta,
    buildings: &[Building],
    properties: &[ValidatedProperty],
) -> Result<WrittenReports, ReportError> {
    writer.prepare().await?;

    let body = ReportBody::Buildings(buildings);
    let json = writer
        .write(&format!("{LISTING_REPORT_STEM}.json"), &json::render(meta, body)?)
        .await?;
    let markdown = writer
        .write(&format!("{LISTING_REPORT_STEM}.md"), &markdown::render(meta, body))
        .await?;
    let html = writer
        .write(&format!("{LISTING_REPORT_STEM}.html"), &html::render(meta, body))
        .await?;
    let results = writer
        .write(
            &meta.results_file_name(),
            &json::render(meta, ReportBody::Properties(properties))?,
        )
        .await?;

    Ok(WrittenReports {
        json,
        markdown,
        html,
        results,
    })
}

/// Unit fields in render order: label and formatted value
pub(crate) fn unit_fields(unit: &Unit) -> [(&'static str, Option<String>); 7] {
    [
        ("Floor", unit.floor.as_ref().map(Floor::to_string)),
        ("Rent", unit.rent.map(format_yen)),
        ("Management fee", unit.management_fee.map(format_yen)),
        ("Security deposit", unit.security_deposit.map(format_yen)),
        ("Key money", unit.key_money.map(format_yen)),
        ("Layout", unit.layout.clone()),
        ("Area", unit.area.map(format_area)),
    ]
}

/// Property fields in render order
pub(crate) fn property_fields(property: &ValidatedProperty) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("Price", Some(format!("{}/month", format_yen(property.price)))),
        ("Floor Area", Some(format_area(property.floor_area))),
        ("Floor", Some(format!("{}F", property.floor))),
        (
            "Station",
            Some(format!("{} ({}min)", property.nearest_station, property.station_distance)),
        ),
        ("Address", Some(property.address.clone())),
        ("Layout", property.layout.clone()),
        ("Direction", property.direction.clone()),
        ("Building material", Some(property.building_material.clone())),
        ("Gas type", Some(property.gas_type.clone())),
        ("Attributes", Some(property.attribute_origin.as_str().to_string())),
        ("Posted", property.posted_date.clone()),
        ("URL", property.url.clone()),
    ]
}

/// `¥185,000`; fractional yen are rounded
pub fn format_yen(amount: Decimal) -> String {
    let rounded = amount.round().normalize();
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

pub fn format_area(area: Decimal) -> String {
    format!("{}m²", area.normalize())
}

pub(crate) fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("0", "¥0")]
    #[case("999", "¥999")]
    #[case("85000", "¥85,000")]
    #[case("1234567", "¥1,234,567")]
    #[case("185000.4", "¥185,000")]
    fn test_format_yen(#[case] amount: &str, #[case] expected: &str) {
        assert_eq!(format_yen(Decimal::from_str(amount).unwrap()), expected);
    }

    #[test]
    fn test_format_area_drops_trailing_zeros() {
        assert_eq!(format_area(Decimal::from_str("70.50").unwrap()), "70.5m²");
    }

    #[test]
    fn test_placeholder_for_blank() {
        assert_eq!(or_placeholder(Some("  ")), PLACEHOLDER);
        assert_eq!(or_placeholder(None), PLACEHOLDER);
        assert_eq!(or_placeholder(Some("2LDK")), "2LDK");
    }
}
